//! Dashboard principal – App eframe/egui.
//!
//! O ciclo de leitura roda na thread da UI, cadenciado pelo [`Ticker`];
//! a descoberta roda em background ([`scan_thread`]).

use crate::panels::{self, DevicePanel};
use crate::scan_thread::{self, ScanResult};
use crate::theme_egui::{self, EguiTheme};
use crossbeam_channel::{Receiver, TryRecvError};
use egui::{Color32, RichText};
use egui_plot::{Line, Plot, PlotPoints};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::time::Instant;
use thermals_core::config::AppConfig;
use thermals_core::hardware::{self, GpuName};
use thermals_core::{DeviceClass, InstanceId, MetricTable, Snapshot, TemperatureUnit, ThermalEngine, Ticker};
use tracing::{info, warn};

const HISTORY_SIZE: usize = 120; // 2 minutos a 1 Hz

/// Estado da varredura do hwmon.
enum ScanState {
    Running(Receiver<ScanResult>),
    Done,
    Failed(String),
}

/// Estado do dashboard.
pub struct ThermalsDashboard {
    config: AppConfig,
    theme: EguiTheme,
    theme_index: usize,
    all_themes: Vec<EguiTheme>,

    // Motor
    engine: ThermalEngine,
    ticker: Ticker,
    scan: ScanState,
    snapshot: Snapshot,

    // Cabeçalho
    cpu_name: String,
    /// Modelo de cada GPU da tabela atual, por índice
    gpu_names: BTreeMap<u32, GpuName>,

    // Histórico de temperaturas para gráficos
    history: HistoryData,

    // UI state
    show_graphs: bool,
    is_fullscreen: bool,
}

/// Teclas pressionadas neste frame.
struct KeyPresses {
    graphs: bool,
    theme: bool,
    quit: bool,
    fullscreen: bool,
    reset: bool,
    rescan: bool,
}

/// Últimas leituras de cada instância de temperatura, em °C.
struct HistoryData {
    series: BTreeMap<InstanceId, VecDeque<f64>>,
}

impl HistoryData {
    fn new() -> Self {
        Self {
            series: BTreeMap::new(),
        }
    }

    fn push(&mut self, snapshot: &Snapshot) {
        for reading in snapshot.iter().filter(|r| r.metric().is_temperature()) {
            // Leitura stale não entra no gráfico
            let (false, Some(value)) = (reading.stale, reading.state.current) else {
                continue;
            };
            let deque = self
                .series
                .entry(reading.id)
                .or_insert_with(|| VecDeque::with_capacity(HISTORY_SIZE));
            if deque.len() >= HISTORY_SIZE {
                deque.pop_front();
            }
            deque.push_back(value);
        }
    }

    /// Descarta séries de instâncias que não existem mais.
    fn retain(&mut self, table: &MetricTable) {
        let ids = table.instance_ids();
        self.series.retain(|id, _| ids.binary_search(id).is_ok());
    }
}

impl ThermalsDashboard {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        // Carrega tema
        let all_themes = theme_egui::all_themes();
        let theme_index = all_themes
            .iter()
            .position(|t| t.name == config.display.theme)
            .unwrap_or(0);
        let theme = all_themes[theme_index].clone();

        let engine = ThermalEngine::from_app_config(&config);
        let scan = ScanState::Running(scan_thread::spawn_scan(config.engine.clone()));

        Self {
            ticker: Ticker::new(config.poll_interval()),
            show_graphs: config.display.show_graphs,
            config,
            theme,
            theme_index,
            all_themes,
            engine,
            scan,
            snapshot: Snapshot::empty(),
            cpu_name: hardware::cpu_model_name(),
            gpu_names: BTreeMap::new(),
            history: HistoryData::new(),
            is_fullscreen: false,
        }
    }

    fn unit(&self) -> TemperatureUnit {
        self.config.display.temperature_unit
    }

    /// Recebe o resultado de uma varredura em andamento, se já terminou.
    fn poll_scan(&mut self) {
        let ScanState::Running(rx) = &self.scan else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.scan = ScanState::Failed("thread de descoberta encerrada".into());
                return;
            }
        };

        match result {
            Ok(table) => {
                self.history.retain(&table);
                self.gpu_names = hardware::gpu_names(&table, &self.config.engine.pci_ids);
                for (index, gpu) in self.gpu_names.iter().filter(|(_, g)| !g.known) {
                    info!("GPU #{index} {} não listada no pci.ids", gpu.name);
                }
                self.engine.install_table(table);
                self.scan = ScanState::Done;
            }
            Err(e) => {
                warn!("Descoberta falhou: {e}");
                self.engine.install_table(Arc::new(MetricTable::default()));
                self.history.retain(self.engine.table());
                self.gpu_names.clear();
                self.scan = ScanState::Failed(e.to_string());
            }
        }
        // Primeira leitura da nova tabela sem esperar o intervalo
        self.ticker = Ticker::new(self.ticker.interval());
    }

    fn rescan(&mut self) {
        if matches!(self.scan, ScanState::Running(_)) {
            return;
        }
        info!("Nova varredura solicitada");
        self.scan = ScanState::Running(scan_thread::spawn_scan(self.engine.config().clone()));
    }

    fn reset(&mut self) {
        self.engine.reset();
        // O snapshot exibido é uma cópia; limpa também os extremos dele
        for reading in self.snapshot.readings.values_mut() {
            reading.state.reset_extremes();
        }
    }

    /// Executa um ciclo se o intervalo venceu e nenhum outro está em curso.
    fn poll_tick(&mut self) {
        if matches!(self.scan, ScanState::Running(_)) && self.engine.table().is_empty() {
            return;
        }
        if let Some(_guard) = self.ticker.try_begin(Instant::now()) {
            self.snapshot = self.engine.tick();
            self.history.push(&self.snapshot);
        }
    }

    /// Leituras agrupadas por dispositivo, na ordem da tabela.
    fn device_panels(&self) -> Vec<DevicePanel<'_>> {
        self.engine
            .table()
            .devices()
            .iter()
            .map(|device| {
                let gpu = match device.class {
                    DeviceClass::Gpu => self.gpu_names.get(&device.index),
                    _ => None,
                };
                let title = match (device.class, gpu) {
                    (DeviceClass::Cpu, _) if device.index == 0 => self.cpu_name.clone(),
                    (DeviceClass::Gpu, Some(gpu)) if device.index == 0 => gpu.name.clone(),
                    (DeviceClass::Gpu, Some(gpu)) => format!("{} #{}", gpu.name, device.index),
                    _ => format!("{} #{} ({})", device.class, device.index, device.name),
                };
                let title_hint = gpu
                    .filter(|g| !g.known)
                    .map(|_| "Modelo não listado no pci.ids; atualize o banco (update-pciids)".to_string());
                DevicePanel {
                    class: device.class,
                    index: device.index,
                    title,
                    title_hint,
                    accent: self.theme.class_color(device.class),
                    readings: self
                        .snapshot
                        .of_class(device.class)
                        .filter(|r| r.id.device_index == device.index)
                        .collect(),
                }
            })
            .collect()
    }

    /// Renderiza os gráficos de histórico.
    fn render_graphs(&self, ui: &mut egui::Ui) {
        let available_width = ui.available_width();
        let plot_height = 110.0;
        let unit = self.unit();

        ui.horizontal_wrapped(|ui: &mut egui::Ui| {
            let w = (available_width / 4.0) - 8.0;
            for (id, data) in &self.history.series {
                let Some(reading) = self.snapshot.get(id) else {
                    continue;
                };
                let label = format!("{} {}", reading.display_name(), unit.symbol());
                let color = self.theme.class_color(id.device_class);
                let y_max = unit.convert(reading.critical.unwrap_or(100.0));
                ui.vertical(|ui: &mut egui::Ui| {
                    self.mini_plot(ui, *id, &label, data, unit, color, w, plot_height, y_max);
                });
            }
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn mini_plot(
        &self,
        ui: &mut egui::Ui,
        id: InstanceId,
        label: &str,
        data: &VecDeque<f64>,
        unit: TemperatureUnit,
        color: Color32,
        width: f32,
        height: f32,
        y_max: f64,
    ) {
        ui.label(RichText::new(label).color(color).monospace().size(11.0));

        let points: PlotPoints = data
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, unit.convert(v)])
            .collect();

        let line = Line::new(points).color(color).width(1.5);

        Plot::new(("plot", id))
            .height(height)
            .width(width)
            .show_axes(false)
            .show_grid(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_y(unit.convert(0.0))
            .include_y(y_max)
            .show(ui, |plot_ui| {
                plot_ui.line(line);
            });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let (text, color) = match &self.scan {
            ScanState::Running(_) => ("◌ Varrendo sensores...".to_string(), self.theme.dim),
            ScanState::Failed(e) => (format!("○ Nenhum sensor disponível: {e}"), self.theme.critical),
            ScanState::Done if !self.engine.table().has_devices() => {
                ("○ Nenhum sensor reconhecido".to_string(), self.theme.warning)
            }
            ScanState::Done if self.engine.table().is_empty() => {
                ("○ Dispositivos sem sensores legíveis".to_string(), self.theme.warning)
            }
            ScanState::Done => {
                let stale = self.snapshot.stale_count();
                let mut text = format!(
                    "● {} dispositivos | {} sensores | {} ms",
                    self.engine.table().device_count(),
                    self.snapshot.len(),
                    self.ticker.interval().as_millis()
                );
                if stale > 0 {
                    text.push_str(&format!(" | {stale} sem leitura"));
                }
                if self.ticker.skipped() > 0 {
                    text.push_str(&format!(" | {} ciclos descartados", self.ticker.skipped()));
                }
                (text, self.theme.cpu)
            }
        };
        ui.label(RichText::new(text).color(color).monospace());
    }
}

impl eframe::App for ThermalsDashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Descoberta e leitura ──
        self.poll_scan();
        self.poll_tick();

        // ── Próximo repaint no próximo ciclo ──
        let wait = if matches!(self.scan, ScanState::Running(_)) {
            std::time::Duration::from_millis(50)
        } else {
            self.ticker.time_until_due(Instant::now())
        };
        ctx.request_repaint_after(wait);

        // ── Configurar estilo visual baseado no tema ──
        let mut visuals = if self.theme.name == "light" {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        visuals.panel_fill = self.theme.bg;
        visuals.window_fill = self.theme.panel;
        visuals.override_text_color = Some(self.theme.text);
        visuals.widgets.noninteractive.bg_stroke.color = self.theme.border;
        ctx.set_visuals(visuals);

        // ── Atalhos de teclado ──
        let keys = ctx.input(|i: &egui::InputState| KeyPresses {
            graphs: i.key_pressed(egui::Key::G),
            theme: i.key_pressed(egui::Key::T),
            quit: i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape),
            fullscreen: i.key_pressed(egui::Key::F) || i.key_pressed(egui::Key::F11),
            reset: i.key_pressed(egui::Key::R),
            rescan: i.key_pressed(egui::Key::S),
        });
        if keys.graphs {
            self.show_graphs = !self.show_graphs;
        }
        if keys.theme {
            self.theme_index = (self.theme_index + 1) % self.all_themes.len();
            self.theme = self.all_themes[self.theme_index].clone();
            info!("Tema: {}", self.theme.name);
        }
        if keys.quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if keys.fullscreen {
            self.is_fullscreen = !self.is_fullscreen;
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.is_fullscreen));
        }
        if keys.reset {
            self.reset();
        }
        if keys.rescan {
            self.rescan();
        }

        // ── Painel central ──
        egui::CentralPanel::default().show(ctx, |ui: &mut egui::Ui| {
            // ── Título ──
            ui.vertical_centered(|ui: &mut egui::Ui| {
                ui.label(
                    RichText::new("🌡 LX THERMALS")
                        .color(self.theme.title)
                        .size(22.0)
                        .strong()
                        .monospace(),
                );
                self.render_status(ui);
            });

            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui: &mut egui::Ui| {
                let unit = self.unit();
                let devices = self.device_panels();
                for row in devices.chunks(3) {
                    ui.columns(row.len(), |cols| {
                        for (col, panel) in cols.iter_mut().zip(row) {
                            panels::render_device(col, panel, &self.theme, unit);
                        }
                    });
                    ui.add_space(6.0);
                }

                if self.show_graphs && !self.history.series.is_empty() {
                    ui.add_space(8.0);
                    ui.separator();
                    self.render_graphs(ui);
                }
            });

            // ── Help bar (fundo) ──
            ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui: &mut egui::Ui| {
                ui.label(
                    RichText::new("[R] Reset | [S] Rescan | [G] Graphs | [T] Theme | [F] Fullscreen | [Q/Esc] Quit")
                        .color(self.theme.dim)
                        .monospace()
                        .size(10.0),
                );
            });
        });
    }
}
