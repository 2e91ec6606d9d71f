use crate::cli::args::{ConfigArgs, ConfigCmd};
use crate::exit_codes::{CONFIG_ERROR, SUCCESS};
use anyhow::Result;
use std::path::Path;

use super::load_config;

pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> Result<i32> {
    match args.cmd {
        ConfigCmd::Show => {
            let config = load_config(config_path)?;
            print!("{}", config.to_yaml()?);
            Ok(SUCCESS)
        }
        ConfigCmd::Check => match load_config(config_path) {
            Ok(_) => {
                match config_path {
                    Some(p) => println!("config OK: {}", p.display()),
                    None => println!("config OK: built-in defaults"),
                }
                Ok(SUCCESS)
            }
            Err(e) => {
                eprintln!("config invalid: {e:#}");
                Ok(CONFIG_ERROR)
            }
        },
    }
}
