pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_IMAGE_MIME: &str = "image/png";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const TEST_MODE_ENV: &str = "GEMINI_TEST_MODE";
pub const TEST_API_KEY: &str = "test-api-key";

pub const GENERATIONS_DIR_NAME: &str = "generations";
pub const EDITS_DIR_NAME: &str = "edits";
pub const ASSETS_DIR: &str = "assets/images";
/// Tools run from `<repo>/.opencode/tool`, two levels below the repo root.
pub const REPO_ROOT_ASCENT: usize = 2;
pub const DEFAULT_GENERATED_NAME: &str = "generated";
pub const DEFAULT_EDIT_NAME: &str = "image";
pub const OUTPUT_EXTENSION: &str = ".png";
pub const STRIPPED_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

pub const PROMPT_PREVIEW_CHARS: usize = 50;
pub const MOCK_ANALYSIS: &str = "This is a test image analysis response.";

pub const DEFAULT_IDLE_PHRASE: &str = "Your code is done!";
pub const DEFAULT_ANNOUNCE_PROGRAM: &str = "say";
pub const CONFIG_FILE_NAME: &str = "image-toolkit.toml";
