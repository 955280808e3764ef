use std::io::IsTerminal;
use std::path::PathBuf;

use argh::FromArgs;
use exitcode::ExitCode;
use ipvs_plugin::config::Config;
use ipvs_plugin::plugin::{Helper, IpvsPlugin, META_ENV};
use ipvs_plugin::{Error, trace};
use tracing::{debug, error};

#[derive(FromArgs)]
#[argh(
    description = "Report IPVS real server connections and weights to the monitoring agent",
    help_triggers("-h", "--help")
)]
pub struct RootCommand {
    #[argh(switch, short = 'v', description = "show version")]
    version: bool,

    #[argh(
        option,
        short = 'l',
        default = "\"warn\".to_string()",
        description = "log level"
    )]
    log_level: String,

    #[argh(
        option,
        short = 'c',
        long = "config",
        description = "read configuration from a YAML file"
    )]
    config: Option<PathBuf>,

    #[argh(option, description = "path to ip_vs, default /proc/net/ip_vs")]
    target: Option<PathBuf>,

    #[argh(option, description = "file to keep values of the previous run in")]
    tempfile: Option<PathBuf>,

    #[argh(subcommand)]
    sub_commands: Option<SubCommands>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommands {
    Graphs(Graphs),
}

#[derive(FromArgs)]
#[argh(
    subcommand,
    name = "graphs",
    description = "Print graph definitions, then exit",
    help_triggers("-h", "--help")
)]
struct Graphs {}

impl RootCommand {
    #![allow(clippy::print_stdout)]
    fn show_version(&self) {
        println!("ipvs-plugin {}", env!("CARGO_PKG_VERSION"));
    }

    fn load_config(&self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(target) = &self.target {
            config.target = target.clone();
        }
        if let Some(tempfile) = &self.tempfile {
            config.tempfile = Some(tempfile.clone());
        }

        Ok(config)
    }

    fn meta(&self) -> bool {
        matches!(self.sub_commands, Some(SubCommands::Graphs(_)))
            || std::env::var_os(META_ENV).is_some_and(|value| !value.is_empty())
    }

    pub fn run(&self) -> Result<(), ExitCode> {
        if self.version {
            self.show_version();
            return Ok(());
        }

        let log_level = std::env::var("IPVS_PLUGIN_LOG").unwrap_or(self.log_level.clone());
        trace::init(std::io::stderr().is_terminal(), &log_level);

        let config = self.load_config().map_err(|err| {
            error!(message = "load config failed", %err);
            err.exit_code()
        })?;
        debug!(message = "loaded config", ?config);

        let helper = Helper::new(IpvsPlugin::new(config.target.clone()), config.tempfile());
        let mut stdout = std::io::stdout().lock();
        helper.run(self.meta(), &mut stdout).map_err(|err| {
            error!(message = "collect ipvs metrics failed", %err);
            err.exit_code()
        })
    }
}
