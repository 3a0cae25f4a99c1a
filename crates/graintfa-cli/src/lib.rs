//! CLI logic for the Graintfa texture renderer.
//!
//! This module contains the core CLI logic: load configuration, read a
//! scene document, render it, and write the PNG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use graintfa::{
    GraintfaError, GuiBuilder,
    config::{AppConfig, ExportConfig},
    registry::ElementRegistry,
};

/// Run the Graintfa CLI application
///
/// With `--list-elements` this prints the registered elements and returns.
/// Otherwise it renders the input scene and writes the PNG to the output
/// path.
///
/// # Errors
///
/// Returns `GraintfaError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed scene documents
/// - Export errors
pub fn run(args: &Args) -> Result<(), GraintfaError> {
    if args.list_elements {
        let registry = ElementRegistry::with_builtins()?;
        print!("{}", describe_elements(&registry));
        return Ok(());
    }

    let input = args
        .input
        .as_deref()
        .ok_or_else(|| GraintfaError::Config("no input file given".to_string()))?;

    info!(
        input_path = input,
        output_path = args.output;
        "Processing scene"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(scale) = args.scale {
        app_config = AppConfig::new(app_config.render().clone(), ExportConfig::new(scale));
    }

    let source = fs::read_to_string(input)?;

    let builder = GuiBuilder::new(app_config)?;
    let scene = builder.parse(&source)?;
    let png = builder.render_png(&scene)?;

    fs::write(&args.output, png)?;

    info!(output_file = args.output; "PNG exported successfully");

    Ok(())
}

/// One line per registered element: id, registerer, minimum size and
/// config keys.
fn describe_elements(registry: &ElementRegistry) -> String {
    registry
        .iter()
        .map(|(id, element)| {
            let min = element.min_size();
            let schema = element.config_schema();
            let keys: Vec<&str> = schema.iter().map(|(key, _)| key).collect();
            format!(
                "{id} ({}) min {}x{} config [{}]\n",
                registry.registerer(id).unwrap_or_default(),
                min.width(),
                min.height(),
                keys.join(", ")
            )
        })
        .collect()
}
