use std::{
    fs,
    path::Path,
};

extern crate anyhow;
use anyhow::Context;

extern crate log;
use log::info;

use crate::extract::OffsetTable;
use crate::settings::{
    BANNER_WIDTH,
    CONFIG_NAME,
    PDB_GUID,
    WIN_KDBG,
    WIN_KDVB,
    WIN_NTOSKRNL,
};

/// Render the LibVMI config block. The result has no trailing newline.
pub fn render_config(offsets: &OffsetTable) -> String {
    let mut config = String::new();

    config.push_str("# CORRECT LibVMI Configuration for Your Windows 7 Build\n");
    config.push_str("# Generated from real Volatility3 symbols\n");
    config.push_str(&format!("# PDB GUID: {}\n", PDB_GUID));
    config.push('\n');
    config.push_str(&format!("{} {{\n", CONFIG_NAME));
    config.push_str("    ostype = \"Windows\";\n");
    config.push_str("    \n");
    config.push_str("    # Real EPROCESS offsets from your kernel symbols");

    for (config_name, offset) in offsets.iter() {
        config.push_str(&format!("\n    {} = 0x{:x};", config_name, offset));
    }

    config.push_str("\n    \n");
    config.push_str("    # Optional: Kernel information from vmi-win-guid\n");
    config.push_str(&format!("    win_kdbg = 0x{:x};\n", WIN_KDBG));
    config.push_str(&format!("    win_kdvb = 0x{:x};\n", WIN_KDVB));
    config.push_str(&format!("    win_ntoskrnl = 0x{:x};\n", WIN_NTOSKRNL));
    config.push('}');

    config
}

/// Print the config for `offsets` and save it to `out_path`, replacing any
/// existing file. Returns whether a file was written.
pub fn generate_config(offsets: Option<&OffsetTable>, out_path: &Path) -> anyhow::Result<bool> {
    let offsets = match offsets {
        Some(offsets) if !offsets.is_empty() => offsets,
        _ => {
            println!("[-] No offsets found, cannot generate config");
            return Ok(false);
        }
    };

    println!("\n{}", "=".repeat(BANNER_WIDTH));
    println!("CORRECT LIBVMI.CONF FOR YOUR WINDOWS 7 BUILD");
    println!("{}", "=".repeat(BANNER_WIDTH));

    let config = render_config(offsets);
    println!("{}", config);

    fs::write(out_path, &config)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!("wrote {} bytes to {}", config.len(), out_path.display());

    println!("\n[+] Configuration saved to: {}", out_path.display());
    println!("[+] Copy this to /etc/libvmi.conf to fix the garbled names");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::extract::OffsetTable;
    use crate::render::{
        generate_config,
        render_config,
    };

    fn table(entries: &[(&'static str, u64)]) -> OffsetTable {
        let mut t = OffsetTable::new();
        for (k, v) in entries {
            t.insert(*k, *v);
        }
        t
    }

    #[test]
    fn render_all() {
        let offsets = table(&[
            ("win_tasks", 0x188),
            ("win_pid", 0x180),
            ("win_pname", 0x2e0),
            ("win_peb", 0x338),
            ("win_threads", 0x308),
            ("win_pdbase", 0x28),
        ]);
        let expected = "\
# CORRECT LibVMI Configuration for Your Windows 7 Build
# Generated from real Volatility3 symbols
# PDB GUID: 3844dbb920174967be7aa4a2c20430fa2

win7-vmi {
    ostype = \"Windows\";
    
    # Real EPROCESS offsets from your kernel symbols
    win_tasks = 0x188;
    win_pid = 0x180;
    win_pname = 0x2e0;
    win_peb = 0x338;
    win_threads = 0x308;
    win_pdbase = 0x28;
    
    # Optional: Kernel information from vmi-win-guid
    win_kdbg = 0x1f10a0;
    win_kdvb = 0xfffff8000284e0a0;
    win_ntoskrnl = 0x265d000;
}";
        assert_eq!(render_config(&offsets), expected);
    }

    #[test]
    fn render_partial() {
        let offsets = table(&[("win_pid", 0x180), ("win_pname", 0x2e0)]);
        let config = render_config(&offsets);
        let assignments: Vec<&str> = config
            .lines()
            .filter(|l| l.starts_with("    win_") && !l.contains("win_k") && !l.contains("win_nt"))
            .collect();
        assert_eq!(assignments, vec!["    win_pid = 0x180;", "    win_pname = 0x2e0;"]);
    }

    #[test]
    fn render_is_deterministic() {
        let offsets = table(&[("win_peb", 0x338)]);
        assert_eq!(render_config(&offsets), render_config(&offsets));
    }

    #[test]
    fn constants_always_present() {
        let config = render_config(&OffsetTable::new());
        assert!(config.contains("    win_kdbg = 0x1f10a0;\n"));
        assert!(config.contains("    win_kdvb = 0xfffff8000284e0a0;\n"));
        assert!(config.contains("    win_ntoskrnl = 0x265d000;\n"));
        assert!(config.ends_with('}'));
    }

    #[test]
    fn generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("libvmi_real_offsets.conf");
        let offsets = table(&[("win_pid", 0x180)]);
        assert!(generate_config(Some(&offsets), &out).unwrap());
        assert_eq!(fs::read_to_string(&out).unwrap(), render_config(&offsets));
    }

    #[test]
    fn generate_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("libvmi_real_offsets.conf");
        fs::write(&out, "stale contents that are longer than nothing").unwrap();
        let offsets = table(&[("win_peb", 0x338)]);
        generate_config(Some(&offsets), &out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), render_config(&offsets));
    }

    #[test]
    fn generate_nothing_without_offsets() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("libvmi_real_offsets.conf");
        assert!(!generate_config(None, &out).unwrap());
        assert!(!generate_config(Some(&OffsetTable::new()), &out).unwrap());
        assert!(!out.exists());
    }
}
