use anyhow::Context;
use png_rewrite::{transform, Codec, PngCodec};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

fn main() -> anyhow::Result<()> {
    let mut args: Vec<_> = std::env::args_os().skip(1).collect();
    let verbosity = if args.first().and_then(|arg| arg.to_str()) == Some("-v") {
        args.remove(0);
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();
    let suite_dir = args
        .first()
        .map_or_else(|| PathBuf::from("tests/png-suite/"), PathBuf::from);
    let output_dir = args
        .get(1)
        .map_or_else(|| PathBuf::from("benchmark"), PathBuf::from);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    // PngSuite marks its deliberately corrupt files with a leading 'x'.
    let mut test_images: Vec<_> = fs::read_dir(&suite_dir)
        .with_context(|| format!("Failed to read {}", suite_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path.extension() == Some(OsStr::new("png"))
                && !path
                    .file_name()
                    .and_then(|file_name| file_name.to_str())
                    .map(|file_name| file_name.starts_with('x'))
                    .unwrap_or(true)
        })
        .collect();
    test_images.sort();

    let codec = PngCodec;
    let mut processed_images = Vec::with_capacity(test_images.len());
    let mut failed_images = serde_json::Map::new();
    for image_path in test_images {
        let Some(test_name) = image_path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        match process_one(&codec, &image_path, &output_dir, test_name) {
            Ok(()) => processed_images.push(test_name.to_owned()),
            Err(e) => {
                log::error!("{test_name}: {e:#}");
                failed_images.insert(test_name.to_owned(), format!("{e:#}").into());
            }
        }
    }

    let now = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
    let results = serde_json::json!({
        "date": now,
        "processed_images": processed_images,
        "failed_images": failed_images,
    });
    fs::write(output_dir.join("test_results.json"), results.to_string())?;
    log::info!(
        "Processed {} images, {} failed",
        processed_images.len(),
        failed_images.len()
    );
    Ok(())
}

fn process_one(
    codec: &impl Codec,
    image_path: &Path,
    output_dir: &Path,
    test_name: &str,
) -> anyhow::Result<()> {
    let orig_name = output_dir.join(format!("{test_name}-orig.png"));
    let rgba_name = output_dir.join(format!("{test_name}-rgba.png"));
    fs::copy(image_path, &orig_name).with_context(|| {
        format!(
            "Failed to copy from {} to {}",
            image_path.display(),
            orig_name.display()
        )
    })?;
    let image = codec
        .decode(image_path)
        .with_context(|| format!("Failed to decode {}.", image_path.display()))?;
    codec.encode(&rgba_name, &transform::process(&image)?)?;
    Ok(())
}
