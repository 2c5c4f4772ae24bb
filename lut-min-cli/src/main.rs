// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use lut_min_cli::LutMinApp;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = LutMinApp::parse();
    TermLogger::init(
        app.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    println!("{}", app.exec()?);
    Ok(())
}
