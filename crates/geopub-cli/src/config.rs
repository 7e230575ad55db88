use clap::Parser;
use geopub_core::{load_config, Config};
use std::path::Path;

/// Command line interface.
///
/// The tool takes no options: everything comes from `config.json` in the
/// working directory.
#[derive(Parser, Debug)]
#[command(name = "geopub")]
#[command(
    author,
    version,
    about = "Publish every unassigned GeoServer feature type in the configured workspaces"
)]
#[command(after_help = "Reads config.json from the working directory:
  {
    \"geoserver\": {
      \"host\": \"geoserver.hel.fi\",
      \"prefix\": \"/geoserver/rest\",
      \"auth\": \"Basic xxxxxxxxxxxxxxxxxxxxxxxxxx==\"
    },
    \"workspaces\": [\"ltj-virka\", \"ltj-avoin\", \"ltj-dev\"],
    \"name_title_map\": {\"arvo_kaapakohteet\": \"Valuable conks\"}
  }

The auth value is a complete Authorization header, i.e. \"Basic \" followed by
base64 of \"user:password\".")]
pub struct Cli {}

/// Loads `config.json`, reducing a failure to its user-facing message.
pub fn load_configuration(path: &Path) -> anyhow::Result<Config> {
    load_config(path).map_err(|e| anyhow::anyhow!(e.user_message()))
}
