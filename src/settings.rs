//! Fixed parameters of the generator.

/// Substring matched against `user_types` names.
pub const TARGET_STRUCT: &str = "EPROCESS";

/// `EPROCESS` field name and the LibVMI key its offset is written under.
pub const KEY_FIELDS: [(&str, &str); 6] = [
    ("ActiveProcessLinks", "win_tasks"),
    ("UniqueProcessId", "win_pid"),
    ("ImageFileName", "win_pname"),
    ("Peb", "win_peb"),
    ("ThreadListHead", "win_threads"),
    ("DirectoryTableBase", "win_pdbase"),
];

pub const DEFAULT_SYMBOLS_PATH: &str =
    "~/volatility3/volatility3/symbols/windows/ntkrnlmp.pdb/3844DBB920174967BE7AA4A2C20430FA-2.json.xz";

pub const OUTPUT_FILENAME: &str = "libvmi_real_offsets.conf";

pub const CONFIG_NAME: &str = "win7-vmi";

pub const PDB_GUID: &str = "3844dbb920174967be7aa4a2c20430fa2";

// Taken from one captured guest with vmi-win-guid, not from the symbols.
pub const WIN_KDBG: u64 = 0x1f10a0;
pub const WIN_KDVB: u64 = 0xfffff8000284e0a0;
pub const WIN_NTOSKRNL: u64 = 0x265d000;

pub const BANNER_WIDTH: usize = 80;
