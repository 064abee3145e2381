use pxwind::convert::SPACING_PROPERTIES;
use pxwind::hover::{nearest_spacing_entry, property_description};
use pxwind::{
    apply_with_retry, plan, scan, Config, ConversionStats, Converter, Position, PxwindError,
    PxwindResult, TextBuffer,
};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut write = false;
    let mut config_path: Option<String> = None;
    let mut files: Vec<String> = Vec::new();

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--write" => write = true,
            "--config" => match iter.next() {
                Some(path) => config_path = Some(path.clone()),
                None => {
                    eprintln!("--config requires a path");
                    process::exit(1);
                }
            },
            _ => files.push(arg.clone()),
        }
    }

    if files.is_empty() {
        eprintln!("Usage: pxwind [--write] [--config <file.yaml>] <file.html> [more files...]");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  pxwind index.html");
        eprintln!("  pxwind --write --config pxwind.yaml src/App.jsx");
        process::exit(1);
    }

    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            process::exit(1);
        }
    };

    if !config.enabled {
        println!("pxwind is disabled by configuration; nothing to do");
        process::exit(0);
    }

    let converter = match config.merged_scale(None) {
        Some(scale) => match Converter::with_custom_scale(scale) {
            Ok(converter) => converter,
            Err(e) => {
                eprintln!("✗ {}", e);
                process::exit(1);
            }
        },
        None => Converter::new(),
    };

    let mut exit_code = 0;
    for file_path in &files {
        match process_file(file_path, &converter, &config, write) {
            Ok(stats) => report(file_path, &stats, write),
            Err(message) => {
                eprintln!("✗ {}: {}", file_path, message);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn load_config(path: Option<&str>) -> PxwindResult<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = fs::read_to_string(path)
        .map_err(|e| PxwindError::ConfigError(format!("failed to read {}: {}", path, e)))?;
    serde_yaml::from_str(&content)
        .map_err(|e| PxwindError::ConfigError(format!("invalid config {}: {}", path, e)))
}

fn process_file(
    path: &str,
    converter: &Converter,
    config: &Config,
    write: bool,
) -> Result<ConversionStats, String> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    if !config.supports_file_type(extension) {
        return Err(format!("unsupported file type '.{}'", extension));
    }

    let text = fs::read_to_string(path).map_err(|e| format!("failed to read file: {}", e))?;
    let matches = scan(&text, Position::default(), converter);
    let stats = ConversionStats::from_matches(&matches);

    if config.show_visual_feedback {
        for m in &matches {
            let description = property_description(&m.property).unwrap_or("unknown property");
            if m.is_custom_value && SPACING_PROPERTIES.contains(&m.property.as_str()) {
                let (key, px) = nearest_spacing_entry(m.value);
                println!(
                    "  {} {} → {} ({}; nearest scale entry: {} = {}px)",
                    m.range.start, m.original, m.converted, description, key, px
                );
            } else {
                println!(
                    "  {} {} → {} ({})",
                    m.range.start, m.original, m.converted, description
                );
            }
        }
    }

    if write && !matches.is_empty() {
        let batch = plan(&text, &matches);
        let mut buffer = TextBuffer::from_text(&text);
        apply_with_retry(&mut buffer, &batch).map_err(|e| e.to_string())?;

        let mut output = buffer.to_text();
        if text.ends_with('\n') {
            output.push('\n');
        }
        fs::write(path, output).map_err(|e| format!("failed to write file: {}", e))?;
    }

    Ok(stats)
}

fn report(path: &str, stats: &ConversionStats, write: bool) {
    let action = if write { "converted" } else { "found" };
    println!(
        "✓ {}: {} {} ({} standard, {} arbitrary)",
        path, stats.total, action, stats.standard, stats.custom
    );
}
