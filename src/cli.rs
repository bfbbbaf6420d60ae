//! Command line front end operating on layout document files.
//!
//! Every mutating command loads the document, applies one editor command to
//! it and saves it back in place.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use layoutkit_core::EditorError;
use layoutkit_designer::{
    save_png, Area, EditorOptions, FlipAxis, LayoutDocument, LayoutEditor, Placeable,
    ShapeTemplate,
};
use layoutkit_settings::Config;

use crate::{editor_options, raster_style};

/// Canvas margin around the layout in a rendered preview, in layout units.
const RENDER_MARGIN: f64 = 20.0;

/// Pixel bounds of a rendered preview.
const MIN_IMAGE_SIZE: f64 = 64.0;
const MAX_IMAGE_SIZE: f64 = 8192.0;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Debug, Parser)]
#[command(
    name = "layoutkit",
    version,
    long_version = LONG_VERSION,
    about = "Edit and preview warehouse layout documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Summarize a layout document
    Info {
        document: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rotate an area about its center
    Rotate {
        document: PathBuf,
        id: u64,
        #[arg(allow_negative_numbers = true, value_parser = finite_number)]
        degrees: f64,
    },
    /// Scale an area about its center
    Scale {
        document: PathBuf,
        id: u64,
        #[arg(value_parser = finite_number)]
        scale_x: f64,
        #[arg(value_parser = finite_number)]
        scale_y: f64,
    },
    /// Mirror an area within its box (x or y)
    Flip {
        document: PathBuf,
        id: u64,
        axis: FlipAxis,
    },
    /// Write a PNG preview
    Render {
        document: PathBuf,
        output: PathBuf,
        #[arg(value_parser = finite_number)]
        zoom: Option<f64>,
    },
    /// Add a template polygon area (L, T, U or Cross)
    Template {
        document: PathBuf,
        template: ShapeTemplate,
        #[arg(allow_negative_numbers = true, value_parser = finite_number)]
        x: f64,
        #[arg(allow_negative_numbers = true, value_parser = finite_number)]
        y: f64,
        #[arg(value_parser = finite_number)]
        width: f64,
        #[arg(value_parser = finite_number)]
        height: f64,
    },
}

/// Numbers must be finite; `NaN` and `inf` parse as `f64` but are refused here.
fn finite_number(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.trim().parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{}' is not a finite number", raw))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentSummary {
    id: String,
    name: String,
    zoom: f64,
    areas: usize,
    storages: usize,
    facilities: usize,
}

fn info(path: &Path, json: bool) -> Result<String> {
    let doc = LayoutDocument::load_from_file(path)?;
    if json {
        let summary = DocumentSummary {
            id: doc.metadata.id.to_string(),
            name: doc.metadata.name.clone(),
            zoom: doc.view.zoom,
            areas: doc.areas.len(),
            storages: doc.storages.len(),
            facilities: doc.facilities.len(),
        };
        return serde_json::to_string_pretty(&summary).context("Failed to serialize summary");
    }

    let mut lines = vec![
        format!("{} ({})", doc.metadata.name, doc.metadata.id),
        format!(
            "{} areas, {} storages, {} facilities",
            doc.areas.len(),
            doc.storages.len(),
            doc.facilities.len()
        ),
    ];
    for area in &doc.areas {
        lines.push(format!(
            "  #{} {} [{}] at ({}, {}) {}x{}",
            area.id,
            area.name,
            area.shape_type(),
            area.x,
            area.y,
            area.width,
            area.height
        ));
    }
    Ok(lines.join("\n"))
}

/// Loads `path`, applies `apply` to the selected area and saves the result.
fn transform_area(
    path: &Path,
    id: u64,
    options: EditorOptions,
    label: &str,
    apply: impl FnOnce(&mut LayoutEditor) -> Result<Option<Area>, EditorError>,
) -> Result<String> {
    let mut doc = LayoutDocument::load_from_file(path)?;
    let mut editor = doc.open(options);
    if !editor.store().contains(id) {
        return Err(EditorError::EntityNotFound { id }.into());
    }
    editor.select(Some(id));
    let area = apply(&mut editor)?.ok_or_else(|| anyhow!("Entity {} is not an area", id))?;

    doc.update_from_editor(&editor);
    doc.save_to_file(path)?;
    Ok(format!(
        "{} area {}: ({}, {}) {}x{}",
        label, id, area.x, area.y, area.width, area.height
    ))
}

fn render_document(path: &Path, output: &Path, zoom: Option<f64>, config: &Config) -> Result<String> {
    let doc = LayoutDocument::load_from_file(path)?;
    let mut editor = doc.open(editor_options(&config.editor));
    let zoom = match zoom {
        Some(z) => editor.set_zoom(z),
        None => editor.zoom(),
    };

    let (right, bottom) = editor
        .store()
        .iter()
        .map(|e| e.footprint())
        .fold((0.0f64, 0.0f64), |(r, b), f| {
            (r.max(f.x + f.width), b.max(f.y + f.height))
        });
    let pixels = |extent: f64| {
        ((extent + RENDER_MARGIN) * zoom)
            .ceil()
            .clamp(MIN_IMAGE_SIZE, MAX_IMAGE_SIZE) as u32
    };
    let (width, height) = (pixels(right), pixels(bottom));

    let commands = editor.render_frame();
    save_png(&commands, width, height, &raster_style(&config.render), output)?;
    Ok(format!(
        "Rendered {} entities to {} ({}x{})",
        editor.store().len(),
        output.display(),
        width,
        height
    ))
}

fn add_template(
    path: &Path,
    template: ShapeTemplate,
    bounds: (f64, f64, f64, f64),
    options: EditorOptions,
) -> Result<String> {
    let mut doc = LayoutDocument::load_from_file(path)?;
    let mut editor = doc.open(options);
    let (x, y, width, height) = bounds;
    let id = editor.add_from_template(template, x, y, width, height)?;
    doc.update_from_editor(&editor);
    doc.save_to_file(path)?;
    Ok(format!("Added {} area {}", template, id))
}

/// Runs `command` and returns the text to print.
pub fn run(command: &Commands, config: &Config) -> Result<String> {
    let options = editor_options(&config.editor);
    match command {
        Commands::Info { document, json } => info(document, *json),
        Commands::Rotate {
            document,
            id,
            degrees,
        } => transform_area(document, *id, options, "Rotated", |e| {
            e.rotate_selected(*degrees)
        }),
        Commands::Scale {
            document,
            id,
            scale_x,
            scale_y,
        } => transform_area(document, *id, options, "Scaled", |e| {
            e.scale_selected(*scale_x, *scale_y)
        }),
        Commands::Flip { document, id, axis } => {
            transform_area(document, *id, options, "Flipped", |e| e.flip_selected(*axis))
        }
        Commands::Render {
            document,
            output,
            zoom,
        } => render_document(document, output, *zoom, config),
        Commands::Template {
            document,
            template,
            x,
            y,
            width,
            height,
        } => add_template(document, *template, (*x, *y, *width, *height), options),
    }
}
