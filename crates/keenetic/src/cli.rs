//! Clap derive structures for the `keenetic` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use keenetic_core::InterfaceKind;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// keenetic -- poll and control Keenetic routers over RCI
#[derive(Debug, Parser)]
#[command(
    name = "keenetic",
    version,
    about = "Monitor and control Keenetic routers from the command line",
    long_about = "Reads system, interface, Wi-Fi, modem, and mesh state from a Keenetic\n\
        router through its RCI interface, and drives the few control actions\n\
        the router exposes (interface up/down, SMS).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Router profile to use
    #[arg(long, short = 'p', env = "KEENETIC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Router host or IP (overrides profile)
    #[arg(long, env = "KEENETIC_HOST", global = true)]
    pub host: Option<String>,

    /// Management port (overrides profile)
    #[arg(long, env = "KEENETIC_PORT", global = true)]
    pub port: Option<u16>,

    /// Username (overrides profile)
    #[arg(long, short = 'u', env = "KEENETIC_USERNAME", global = true)]
    pub username: Option<String>,

    /// Router password
    #[arg(long, env = "KEENETIC_PASSWORD", global = true, hide = true)]
    pub password: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "KEENETIC_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "KEENETIC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }

    /// Fill unset output flags from the config file's `[defaults]`.
    pub fn apply_defaults(&mut self, defaults: &keenetic_config::Defaults) {
        if self.output.is_none() {
            self.output = OutputFormat::from_str(&defaults.output, true).ok();
        }
        if self.color.is_none() {
            self.color = ColorMode::from_str(&defaults.color, true).ok();
        }
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Router summary: system, firmware, interface and mesh counts
    #[command(alias = "st")]
    Status,

    /// Inspect wired, Wi-Fi, and modem interfaces
    #[command(alias = "if", alias = "i")]
    Interfaces(InterfacesArgs),

    /// Inspect mesh (Wi-Fi system) member nodes
    Mesh(MeshArgs),

    /// Bring an interface up
    Enable(InterfaceTarget),

    /// Bring an interface down
    Disable(InterfaceTarget),

    /// Send SMS through the mobile interface
    Sms(SmsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Interfaces ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InterfacesArgs {
    #[command(subcommand)]
    pub command: InterfacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InterfacesCommand {
    /// List interfaces from one poll cycle
    #[command(alias = "ls")]
    List {
        /// Only show interfaces of this kind (wan, port, AccessPoint, mobile, usb-modem)
        #[arg(long = "type", short = 't', value_parser = parse_kind)]
        kind: Option<InterfaceKind>,
    },

    /// Show one interface by id
    Get {
        /// Interface id (e.g., WifiMaster0/AccessPoint0, GigabitEthernet0/0)
        id: String,
    },
}

fn parse_kind(s: &str) -> Result<InterfaceKind, String> {
    s.parse()
        .map_err(|_| format!("unknown interface type '{s}'"))
}

#[derive(Debug, Args)]
pub struct InterfaceTarget {
    /// Interface id
    pub id: String,
}

// ── Mesh ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MeshArgs {
    #[command(subcommand)]
    pub command: MeshCommand,
}

#[derive(Debug, Subcommand)]
pub enum MeshCommand {
    /// List mesh member nodes
    #[command(alias = "ls")]
    List,

    /// Show one mesh node by MAC address
    Get {
        /// Node MAC (any case or separator style)
        mac: String,
    },
}

// ── SMS ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SmsArgs {
    #[command(subcommand)]
    pub command: SmsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SmsCommand {
    /// Send a text message
    Send {
        /// Recipient phone number
        #[arg(long)]
        to: String,

        /// Message text
        message: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the current configuration (secrets masked)
    Show,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Store the password of the active profile (or --profile) in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
