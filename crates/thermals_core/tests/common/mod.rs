// Árvore hwmon sintética para os testes de integração

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thermals_core::EngineConfig;

/// Diretório temporário com `hwmon/`, `devices/` e `cpu/`.
pub struct FakeHwmon {
    dir: TempDir,
}

impl FakeHwmon {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("hwmon")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("hwmon")
    }

    /// Configuração apontando para esta árvore (sem cpufreq até
    /// [`Self::cpu_cores`] ser chamado).
    pub fn config(&self) -> EngineConfig {
        let mut config = EngineConfig::with_root(self.root());
        config.cpufreq_root = self.dir.path().join("cpu");
        config
    }

    /// Cria `hwmon/<hwmon>` com o `name` dado.
    pub fn device(&self, hwmon: &str, name: &str) -> PathBuf {
        let dir = self.root().join(hwmon);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("name"), format!("{name}\n")).unwrap();
        dir
    }

    /// Cria `hwmon/<hwmon>/device` apontando para `devices/<target>`,
    /// como o link que o kernel mantém para o dispositivo físico.
    pub fn link_device(&self, hwmon: &str, target: &str) {
        let physical = self.dir.path().join("devices").join(target);
        fs::create_dir_all(&physical).unwrap();
        symlink(&physical, self.root().join(hwmon).join("device")).unwrap();
    }

    /// Como [`Self::link_device`], com os IDs PCI em `vendor`/`device`.
    pub fn link_pci_device(&self, hwmon: &str, target: &str, vendor: &str, device: &str) {
        self.link_device(hwmon, target);
        let physical = self.dir.path().join("devices").join(target);
        fs::write(physical.join("vendor"), format!("0x{vendor}\n")).unwrap();
        fs::write(physical.join("device"), format!("0x{device}\n")).unwrap();
    }

    /// Grava um `pci.ids` na árvore e retorna o caminho.
    pub fn pci_ids(&self, content: &str) -> PathBuf {
        let path = self.dir.path().join("pci.ids");
        fs::write(&path, content).unwrap();
        path
    }

    /// Dispositivo cujo `name` não pode ser lido (é um diretório).
    pub fn unreadable_device(&self, hwmon: &str) -> PathBuf {
        let dir = self.root().join(hwmon);
        fs::create_dir_all(dir.join("name")).unwrap();
        fs::write(dir.join("temp1_input"), "40000\n").unwrap();
        dir
    }

    /// Troca os nomes de dois diretórios hwmon, simulando renumeração.
    pub fn swap(&self, a: &str, b: &str) {
        let root = self.root();
        let tmp = root.join("swap.tmp");
        fs::rename(root.join(a), &tmp).unwrap();
        fs::rename(root.join(b), root.join(a)).unwrap();
        fs::rename(&tmp, root.join(b)).unwrap();
    }

    /// Cria `cpu/cpuN/cpufreq/scaling_cur_freq` com os valores em kHz.
    pub fn cpu_cores(&self, khz: &[i64]) {
        for (n, value) in khz.iter().enumerate() {
            let dir = self.dir.path().join("cpu").join(format!("cpu{n}")).join("cpufreq");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("scaling_cur_freq"), format!("{value}\n")).unwrap();
        }
    }
}

/// Escreve `<file>` em um diretório de dispositivo.
pub fn write(device: &Path, file: &str, content: &str) {
    fs::write(device.join(file), format!("{content}\n")).unwrap();
}

/// Dispositivo k10temp com Tctl e Tdie.
pub fn k10temp(hw: &FakeHwmon, hwmon: &str, tctl: i64, tdie: i64) -> PathBuf {
    let dev = hw.device(hwmon, "k10temp");
    write(&dev, "temp1_input", &tctl.to_string());
    write(&dev, "temp1_label", "Tctl");
    write(&dev, "temp2_input", &tdie.to_string());
    write(&dev, "temp2_label", "Tdie");
    dev
}

/// Dispositivo amdgpu com edge/junction/mem, sclk/mclk e um fan.
pub fn amdgpu(hw: &FakeHwmon, hwmon: &str) -> PathBuf {
    let dev = hw.device(hwmon, "amdgpu");
    write(&dev, "temp1_input", "51000");
    write(&dev, "temp1_label", "edge");
    write(&dev, "temp1_crit", "100000");
    write(&dev, "temp2_input", "63000");
    write(&dev, "temp2_label", "junction");
    write(&dev, "temp2_crit", "110000");
    write(&dev, "temp3_input", "58000");
    write(&dev, "temp3_label", "mem");
    write(&dev, "freq1_input", "2100000000");
    write(&dev, "freq1_label", "sclk");
    write(&dev, "freq2_input", "1249000000");
    write(&dev, "freq2_label", "mclk");
    write(&dev, "fan1_input", "1350");
    dev
}

/// Dispositivo nvme com a temperatura Composite.
pub fn nvme(hw: &FakeHwmon, hwmon: &str, composite: i64) -> PathBuf {
    let dev = hw.device(hwmon, "nvme");
    write(&dev, "temp1_input", &composite.to_string());
    write(&dev, "temp1_label", "Composite");
    dev
}
