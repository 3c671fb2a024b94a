//! Nomes de hardware para os cabeçalhos da UI.
//!
//! CPU: marca via `sysinfo`, com fallback para `/proc/cpuinfo`.
//! GPU: IDs PCI do dispositivo resolvidos no `pci.ids`, por GPU da tabela
//! (`hwmonN/device`) ou pelo primeiro `card*` do DRM.

use crate::table::MetricTable;
use crate::types::DeviceClass;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tracing::debug;

pub const DEFAULT_DRM_ROOT: &str = "/sys/class/drm";
pub const DEFAULT_PCI_IDS: &str = "/usr/share/misc/pci.ids";

/// Nome do modelo da CPU, ou "Unknown CPU".
pub fn cpu_model_name() -> String {
    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()),
    );
    let brand = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|b| !b.is_empty());

    brand
        .or_else(|| {
            fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|c| parse_cpu_model(&c))
        })
        .unwrap_or_else(|| "Unknown CPU".to_string())
}

/// Primeiro "model name" de um `/proc/cpuinfo`.
pub fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .filter(|line| line.starts_with("model name"))
        .find_map(|line| line.split_once(':'))
        .map(|(_, name)| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Nome da GPU e se ele veio do banco PCI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuName {
    pub name: String,
    /// `false` quando o dispositivo ainda não consta no `pci.ids`
    pub known: bool,
}

impl GpuName {
    fn unknown() -> Self {
        Self {
            name: "Unknown GPU".into(),
            known: false,
        }
    }
}

/// Identifica a primeira GPU com IDs PCI em `drm_root`.
pub fn gpu_name(drm_root: &Path, pci_ids: &Path) -> GpuName {
    let Ok(entries) = fs::read_dir(drm_root) else {
        return GpuName::unknown();
    };
    let mut cards: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix("card"))
                .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
        })
        .collect();
    cards.sort();

    cards
        .iter()
        .find_map(|card| pci_device_name(&card.join("device"), pci_ids))
        .unwrap_or_else(GpuName::unknown)
}

/// Nome de cada GPU da tabela, indexado por `device_index`.
///
/// Usa o link `device` de cada `hwmonN`, então cada painel recebe o
/// modelo do seu próprio dispositivo PCI. GPUs sem IDs PCI ficam de fora.
pub fn gpu_names(table: &MetricTable, pci_ids: &Path) -> BTreeMap<u32, GpuName> {
    table
        .devices_of(DeviceClass::Gpu)
        .filter_map(|device| {
            pci_device_name(&device.dir.join("device"), pci_ids).map(|name| (device.index, name))
        })
        .collect()
}

/// Resolve `vendor`/`device` de um diretório de dispositivo PCI.
///
/// `None` quando os IDs não existem; IDs fora do `pci.ids` viram
/// "[vvvv:dddd]" com `known = false`.
pub fn pci_device_name(device_dir: &Path, pci_ids: &Path) -> Option<GpuName> {
    let vendor = read_pci_id(&device_dir.join("vendor"))?;
    let device = read_pci_id(&device_dir.join("device"))?;

    let database = fs::read(pci_ids)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_else(|e| {
            debug!("pci.ids indisponível em {}: {e}", pci_ids.display());
            String::new()
        });

    Some(match lookup_pci_name(&database, &vendor, &device) {
        Some(name) => GpuName { name, known: true },
        None => GpuName {
            name: format!("[{vendor}:{device}]"),
            known: false,
        },
    })
}

/// "0x1002\n" → "1002".
fn read_pci_id(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let id = raw.trim().trim_start_matches("0x").to_ascii_lowercase();
    (!id.is_empty()).then_some(id)
}

/// Resolve "vendor device" no formato do `pci.ids`.
///
/// Linhas de vendor começam sem indentação; dispositivos com um tab.
pub fn lookup_pci_name(database: &str, vendor: &str, device: &str) -> Option<String> {
    let mut current_vendor: Option<&str> = None;

    for line in database.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !line.starts_with('\t') {
            current_vendor = line
                .split_once(char::is_whitespace)
                .filter(|(id, _)| id.eq_ignore_ascii_case(vendor))
                .map(|(_, name)| name.trim());
        } else if let Some(vendor_name) = current_vendor {
            if line.starts_with("\t\t") {
                continue; // subsistemas
            }
            let Some((id, name)) = line.trim().split_once(char::is_whitespace) else {
                continue;
            };
            if id.eq_ignore_ascii_case(device) {
                return Some(format!("{vendor_name} {}", name.trim()));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PCI_IDS: &str = "\
# comentário
1002  Advanced Micro Devices, Inc. [AMD/ATI]
\t73bf  Navi 21 [Radeon RX 6800/6800 XT / 6900 XT]
\t\t1002 0e3a  Radeon RX 6900 XT
\t744c  Navi 31 [Radeon RX 7900 XT/7900 XTX/7900 GRE/7900M]
10de  NVIDIA Corporation
\t2684  AD102 [GeForce RTX 4090]
";

    #[test]
    fn parses_model_name() {
        let cpuinfo = "processor\t: 0\nvendor_id\t: AuthenticAMD\nmodel name\t: AMD Ryzen 7 7800X3D 8-Core Processor\n";
        assert_eq!(
            parse_cpu_model(cpuinfo).as_deref(),
            Some("AMD Ryzen 7 7800X3D 8-Core Processor")
        );
        assert_eq!(parse_cpu_model("processor : 0\n"), None);
    }

    #[test]
    fn looks_up_pci_names() {
        assert_eq!(
            lookup_pci_name(PCI_IDS, "1002", "744C").as_deref(),
            Some("Advanced Micro Devices, Inc. [AMD/ATI] Navi 31 [Radeon RX 7900 XT/7900 XTX/7900 GRE/7900M]")
        );
        assert_eq!(
            lookup_pci_name(PCI_IDS, "10de", "2684").as_deref(),
            Some("NVIDIA Corporation AD102 [GeForce RTX 4090]")
        );
        // Dispositivo de outro vendor não casa
        assert_eq!(lookup_pci_name(PCI_IDS, "10de", "73bf"), None);
        // Subsistema não é dispositivo
        assert_eq!(lookup_pci_name(PCI_IDS, "1002", "0e3a"), None);
    }

    #[test]
    fn gpu_name_from_drm_tree() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("drm/card1/device");
        fs::create_dir_all(&device).unwrap();
        fs::create_dir_all(dir.path().join("drm/card1-DP-1")).unwrap();
        fs::write(device.join("vendor"), "0x1002\n").unwrap();
        fs::write(device.join("device"), "0x744c\n").unwrap();
        let ids = dir.path().join("pci.ids");
        fs::write(&ids, PCI_IDS).unwrap();

        let gpu = gpu_name(&dir.path().join("drm"), &ids);
        assert!(gpu.known);
        assert!(gpu.name.contains("Navi 31"));

        let unresolved = gpu_name(&dir.path().join("drm"), &dir.path().join("missing.ids"));
        assert_eq!(unresolved, GpuName { name: "[1002:744c]".into(), known: false });
    }

    #[test]
    fn pci_name_from_hwmon_device_link() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("hwmon3/device");
        fs::create_dir_all(&device).unwrap();
        fs::write(device.join("vendor"), "0x10de\n").unwrap();
        fs::write(device.join("device"), "0x2684\n").unwrap();
        let ids = dir.path().join("pci.ids");
        fs::write(&ids, PCI_IDS).unwrap();

        let known = pci_device_name(&device, &ids).unwrap();
        assert_eq!(known.name, "NVIDIA Corporation AD102 [GeForce RTX 4090]");
        assert!(known.known);

        fs::write(device.join("device"), "0x2b85\n").unwrap();
        let missing = pci_device_name(&device, &ids).unwrap();
        assert_eq!(missing, GpuName { name: "[10de:2b85]".into(), known: false });

        assert_eq!(pci_device_name(&dir.path().join("hwmon4/device"), &ids), None);
    }

    #[test]
    fn no_drm_means_unknown_gpu() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(gpu_name(&dir.path().join("drm"), Path::new("/nonexistent")), GpuName::unknown());
    }
}
