use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use chrono::{DateTime, NaiveDate, Utc};
use llmapi::utils::sniff_image_mime;
use tokio::fs;
use tokio::fs::try_exists;
use tracing::debug;

use crate::constants::{
    ASSETS_DIR, DEFAULT_EDIT_NAME, DEFAULT_IMAGE_MIME, REPO_ROOT_ASCENT, STRIPPED_EXTENSIONS,
};
use crate::error::{Result, ToolkitError};
use crate::models::{ImageConfig, OutputKind, ParsedImage};

/// MIME type of an image: magic bytes first, then the path's extension when
/// it names an image type, then `image/png`.
pub fn classify(bytes: &[u8], path: &Path) -> String {
    sniff_image_mime(bytes)
        .or_else(|| {
            mime_guess::from_path(path)
                .first_raw()
                .filter(|mime| mime.starts_with("image/"))
        })
        .unwrap_or(DEFAULT_IMAGE_MIME)
        .to_string()
}

/// Accepts a file path (`./img.png`) or a data URL
/// (`data:image/png;base64,...`).
pub async fn parse_image_input(input: &str) -> Result<ParsedImage> {
    if let Some(rest) = input.strip_prefix("data:") {
        let (header, payload) = rest.split_once(',').unwrap_or((rest, ""));
        let mime = header.split(';').next().unwrap_or_default().trim();
        let mime = if mime.is_empty() {
            DEFAULT_IMAGE_MIME
        } else {
            mime
        };
        return Ok(ParsedImage {
            mime: mime.to_string(),
            base64: payload.to_string(),
        });
    }

    let path = Path::new(input);
    let bytes = fs::read(path)
        .await
        .map_err(|err| ToolkitError::io("Unable to read file", path, err))?;

    Ok(ParsedImage {
        mime: classify(&bytes, path),
        base64: BASE64_ENGINE.encode(&bytes),
    })
}

/// Short human label for an image input; data URLs lose their payload.
pub fn describe_input(input: &str) -> String {
    match input.strip_prefix("data:") {
        Some(rest) => {
            let header = rest.split(',').next().unwrap_or_default();
            format!("data:{header},...")
        }
        None => input.to_string(),
    }
}

/// Drops one trailing `.png`, `.jpg` or `.jpeg` (any case).
pub fn strip_image_extension(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    STRIPPED_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext) && name.len() > ext.len())
        .map(|ext| &name[..name.len() - ext.len()])
        .unwrap_or(name)
}

/// Base name for an edit: the custom name, else the input file's stem.
pub fn edit_base_name(image_input: &str, custom_name: Option<&str>) -> String {
    if let Some(name) = custom_name.map(str::trim).filter(|name| !name.is_empty()) {
        return strip_image_extension(name).to_string();
    }
    if image_input.starts_with("data:") {
        return DEFAULT_EDIT_NAME.to_string();
    }
    Path::new(image_input)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(DEFAULT_EDIT_NAME)
        .to_string()
}

/// `<cwd>/../../assets/images`, resolved lexically.
pub fn default_assets_root(cwd: &Path) -> PathBuf {
    let repo_root = cwd
        .ancestors()
        .nth(REPO_ROOT_ASCENT)
        .or_else(|| cwd.ancestors().last())
        .unwrap_or(cwd);
    repo_root.join(ASSETS_DIR)
}

pub fn date_based_path(base_dir: &Path, today: NaiveDate) -> PathBuf {
    base_dir.join(today.format("%Y-%m-%d").to_string())
}

/// Directory a result of `kind` lands in. An explicit output dir is used
/// verbatim; otherwise the assets root is bucketed by date.
pub fn resolve_output_dir(
    config: &ImageConfig,
    assets_root: &Path,
    kind: OutputKind,
    today: NaiveDate,
) -> PathBuf {
    let base_dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => date_based_path(assets_root, today),
    };
    base_dir.join(kind.dir_name())
}

pub async fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|err| ToolkitError::io("Unable to create directory", path, err))
}

/// ISO-8601 instant with `:` and `.` replaced by `-`, without milliseconds
/// and zone: `2026-10-19T12-59-01`.
pub fn timestamp_suffix(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S").to_string()
}

async fn exists(path: &Path) -> Result<bool> {
    try_exists(path)
        .await
        .map_err(|err| ToolkitError::io("Failed to verify file existence", path, err))
}

/// Picks an output path in `directory` that does not overwrite an existing
/// file. Generations fall back to a timestamp suffix; edits take the first
/// free `_edit_NNN` slot. Creates `directory` if needed. `base_name` is
/// used as given; callers strip any image extension first.
///
/// The existence checks are not atomic: concurrent callers with the same
/// base name can pick the same path.
pub async fn unique_file_name(
    directory: &Path,
    base_name: &str,
    extension: &str,
    is_edit: bool,
) -> Result<PathBuf> {
    ensure_dir(directory).await?;

    if !is_edit {
        let candidate = directory.join(format!("{base_name}{extension}"));
        if !exists(&candidate).await? {
            return Ok(candidate);
        }
        let timestamp = timestamp_suffix(Utc::now());
        return Ok(directory.join(format!("{base_name}_{timestamp}{extension}")));
    }

    let mut counter: u32 = 1;
    loop {
        let candidate = directory.join(format!("{base_name}_edit_{counter:03}{extension}"));
        if !exists(&candidate).await? {
            debug!(path = %candidate.display(), "picked edit slot");
            return Ok(candidate);
        }
        counter += 1;
    }
}

async fn verify_written(path: &Path) -> Result<()> {
    if exists(path).await? {
        return Ok(());
    }
    Err(ToolkitError::io(
        "Failed to save file to",
        path,
        std::io::Error::new(std::io::ErrorKind::NotFound, "file missing after write"),
    ))
}

/// Writes `bytes` to `path`, checks the file landed and returns its size.
pub async fn write_image(path: &Path, bytes: &[u8]) -> Result<u64> {
    fs::write(path, bytes)
        .await
        .map_err(|err| ToolkitError::io("Unable to write file", path, err))?;

    verify_written(path).await?;

    let metadata = fs::metadata(path)
        .await
        .map_err(|err| ToolkitError::io("Failed to read metadata for", path, err))?;
    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn classify_prefers_content_over_extension() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0];
        assert_eq!(classify(&jpeg, Path::new("photo.png")), "image/jpeg");
    }

    #[test]
    fn classify_falls_back_to_extension_then_png() {
        assert_eq!(classify(b"????", Path::new("photo.webp")), "image/webp");
        assert_eq!(classify(b"????", Path::new("notes.txt")), "image/png");
        assert_eq!(classify(b"", Path::new("no_extension")), "image/png");
    }

    #[tokio::test]
    async fn data_url_keeps_declared_mime_and_payload() {
        let parsed = parse_image_input("data:image/webp;base64,UklGRg==")
            .await
            .unwrap();
        assert_eq!(parsed.mime, "image/webp");
        assert_eq!(parsed.base64, "UklGRg==");
    }

    #[tokio::test]
    async fn data_url_without_mime_defaults_to_png() {
        let parsed = parse_image_input("data:;base64,AAAA").await.unwrap();
        assert_eq!(parsed.mime, "image/png");
        assert_eq!(parsed.base64, "AAAA");
    }

    #[tokio::test]
    async fn file_input_round_trips_through_base64() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.png");
        let mut bytes = PNG_HEADER.to_vec();
        bytes.extend((0u8..=255).cycle().take(4096));
        std::fs::write(&path, &bytes).unwrap();

        let parsed = parse_image_input(path.to_str().unwrap()).await.unwrap();
        assert_eq!(parsed.mime, "image/png");
        assert_eq!(BASE64_ENGINE.decode(parsed.base64).unwrap(), bytes);
    }

    #[tokio::test]
    async fn unreadable_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.png");
        let err = parse_image_input(missing.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::Io { .. }));
    }

    #[test]
    fn describe_input_hides_data_payload() {
        assert_eq!(
            describe_input("data:image/png;base64,AAAABBBB"),
            "data:image/png;base64,..."
        );
        assert_eq!(describe_input("./cat.png"), "./cat.png");
    }

    #[test]
    fn strips_known_image_extensions_once() {
        assert_eq!(strip_image_extension("ball.png"), "ball");
        assert_eq!(strip_image_extension("ball.JPEG"), "ball");
        assert_eq!(strip_image_extension("ball.jpg.png"), "ball.jpg");
        assert_eq!(strip_image_extension("ball.webp"), "ball.webp");
        assert_eq!(strip_image_extension(".png"), ".png");
    }

    #[test]
    fn edit_base_name_prefers_custom_name() {
        assert_eq!(edit_base_name("shots/cat.jpg", Some("kitty.png")), "kitty");
        assert_eq!(edit_base_name("shots/cat.jpg", None), "cat");
        assert_eq!(edit_base_name("shots/cat.jpg", Some("  ")), "cat");
        assert_eq!(edit_base_name("data:image/png;base64,AAAA", None), "image");
    }

    #[test]
    fn default_assets_root_ascends_two_levels() {
        assert_eq!(
            default_assets_root(Path::new("/work/repo/.opencode/tool")),
            PathBuf::from("/work/repo/assets/images")
        );
        assert_eq!(
            default_assets_root(Path::new("/")),
            PathBuf::from("/assets/images")
        );
    }

    #[test]
    fn output_dir_is_date_bucketed_unless_overridden() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let root = Path::new("/repo/assets/images");

        let default = resolve_output_dir(&ImageConfig::default(), root, OutputKind::Edit, today);
        assert_eq!(default, PathBuf::from("/repo/assets/images/2026-10-19/edits"));

        let custom = ImageConfig {
            output_dir: Some(PathBuf::from("/tmp/t")),
            custom_name: None,
        };
        let overridden = resolve_output_dir(&custom, root, OutputKind::Generation, today);
        assert_eq!(overridden, PathBuf::from("/tmp/t/generations"));
    }

    #[test]
    fn timestamp_suffix_trims_millis_and_zone() {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 12, 59, 1)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(123))
            .unwrap();
        assert_eq!(timestamp_suffix(now), "2026-10-19T12-59-01");
    }

    #[tokio::test]
    async fn generation_uses_plain_name_when_free() {
        let dir = TempDir::new().unwrap();
        let path = unique_file_name(dir.path(), "x", ".png", false).await.unwrap();
        assert_eq!(path, dir.path().join("x.png"));
    }

    #[tokio::test]
    async fn generation_falls_back_to_timestamp_on_collision() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("x.png"), b"old").unwrap();

        let path = unique_file_name(dir.path(), "x", ".png", false)
            .await
            .unwrap();
        assert_ne!(path, dir.path().join("x.png"));
        assert!(!path.exists());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("x_") && name.ends_with(".png"), "{name}");
    }

    #[tokio::test]
    async fn edits_advance_through_numbered_slots() {
        let dir = TempDir::new().unwrap();
        for expected in ["x_edit_001.png", "x_edit_002.png", "x_edit_003.png"] {
            let path = unique_file_name(dir.path(), "x", ".png", true).await.unwrap();
            assert_eq!(path, dir.path().join(expected));
            std::fs::write(&path, b"edit").unwrap();
        }
    }

    #[tokio::test]
    async fn edits_fill_the_first_gap() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("x_edit_001.png"), b"1").unwrap();
        std::fs::write(dir.path().join("x_edit_003.png"), b"3").unwrap();

        let path = unique_file_name(dir.path(), "x", ".png", true).await.unwrap();
        assert_eq!(path, dir.path().join("x_edit_002.png"));
    }

    #[tokio::test]
    async fn unique_file_name_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("2026-10-19").join("generations");

        let path = unique_file_name(&nested, "generated", ".png", false)
            .await
            .unwrap();
        assert!(nested.is_dir());
        assert_eq!(path, nested.join("generated.png"));
    }

    #[tokio::test]
    async fn write_image_reports_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        let size = write_image(&path, PNG_HEADER).await.unwrap();
        assert_eq!(size, PNG_HEADER.len() as u64);
        assert_eq!(std::fs::read(&path).unwrap(), PNG_HEADER);
    }

    #[tokio::test]
    async fn generation_keeps_inner_extension_of_base_name() {
        let dir = TempDir::new().unwrap();
        let path = unique_file_name(dir.path(), "ball.jpg", ".png", false)
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("ball.jpg.png"));
    }

    #[tokio::test]
    async fn missing_output_after_write_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = verify_written(&dir.path().join("vanished.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::Io { .. }));
        assert!(err.to_string().starts_with("Failed to save file to '"));
    }
}
