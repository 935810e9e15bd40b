// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from `Buildwatch.toml`.
///
/// ```toml
/// [styles]
/// glob = "src/styles/**/*.scss"
/// entry = "src/styles/application.scss"
/// output = "dist/app.css"
///
/// [scripts]
/// glob = "src/scripts/**/*.ts*"
/// output = "dist/app.js"
///
/// [server]
/// port = 8080
/// ```
///
/// All sections are optional and have defaults matching a conventional
/// `src/` + `dist/` project layout.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Style pipeline settings from `[styles]`.
    #[serde(default)]
    pub styles: StylesSection,

    /// Script pipeline settings from `[scripts]`.
    #[serde(default)]
    pub scripts: ScriptsSection,

    /// Static asset copy settings from `[assets]`.
    #[serde(default)]
    pub assets: AssetsSection,

    /// Dev-server settings from `[server]`.
    #[serde(default)]
    pub server: ServerSection,

    /// Watch behaviour from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[styles]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StylesSection {
    /// Glob over all style source files; changes to any of them trigger a
    /// recompile of the entry file.
    #[serde(default = "default_styles_glob")]
    pub glob: String,

    /// The single entry stylesheet handed to the compiler.
    #[serde(default = "default_styles_entry")]
    pub entry: String,

    /// Compiled stylesheet bundle.
    #[serde(default = "default_styles_output")]
    pub output: String,

    /// Extra include paths passed to the compiler (`--load-path`).
    #[serde(default)]
    pub include_paths: Vec<String>,

    /// The external style compiler binary.
    #[serde(default = "default_styles_command")]
    pub command: String,
}

fn default_styles_glob() -> String {
    "src/styles/**/*.scss".to_string()
}

fn default_styles_entry() -> String {
    "src/styles/application.scss".to_string()
}

fn default_styles_output() -> String {
    "dist/app.css".to_string()
}

fn default_styles_command() -> String {
    "sass".to_string()
}

impl Default for StylesSection {
    fn default() -> Self {
        Self {
            glob: default_styles_glob(),
            entry: default_styles_entry(),
            output: default_styles_output(),
            include_paths: Vec::new(),
            command: default_styles_command(),
        }
    }
}

/// `[scripts]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptsSection {
    /// Glob over all script source files.
    #[serde(default = "default_scripts_glob")]
    pub glob: String,

    /// Directory receiving transpiled intermediates.
    #[serde(default = "default_scripts_out_dir")]
    pub out_dir: String,

    /// Bundle entry point (a transpiled intermediate, not a source file).
    #[serde(default = "default_scripts_entry")]
    pub entry: String,

    /// Bundled script output.
    #[serde(default = "default_scripts_output")]
    pub output: String,

    /// The external transpiler/type-checker binary.
    #[serde(default = "default_scripts_transpiler")]
    pub transpiler: String,

    /// The external bundler binary.
    #[serde(default = "default_scripts_bundler")]
    pub bundler: String,
}

fn default_scripts_glob() -> String {
    "src/scripts/**/*.ts*".to_string()
}

fn default_scripts_out_dir() -> String {
    "tmp".to_string()
}

fn default_scripts_entry() -> String {
    "tmp/main.js".to_string()
}

fn default_scripts_output() -> String {
    "dist/app.js".to_string()
}

fn default_scripts_transpiler() -> String {
    "tsc".to_string()
}

fn default_scripts_bundler() -> String {
    "esbuild".to_string()
}

impl Default for ScriptsSection {
    fn default() -> Self {
        Self {
            glob: default_scripts_glob(),
            out_dir: default_scripts_out_dir(),
            entry: default_scripts_entry(),
            output: default_scripts_output(),
            transpiler: default_scripts_transpiler(),
            bundler: default_scripts_bundler(),
        }
    }
}

/// `[assets]` section.
///
/// Static content is copied as-is; compiled artifacts are excluded so a stale
/// `app.js` in the asset tree can never clobber a fresh bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsSection {
    /// Directory of static assets to copy recursively.
    #[serde(default = "default_assets_source")]
    pub source: String,

    /// Destination directory for the asset copy.
    #[serde(default = "default_assets_dest")]
    pub dest: String,

    /// The HTML entry page.
    #[serde(default = "default_assets_index")]
    pub index: String,

    /// Where the HTML entry page is copied to.
    #[serde(default = "default_assets_index_dest")]
    pub index_dest: String,

    /// Globs excluded from the asset copy.
    #[serde(default = "default_assets_exclude")]
    pub exclude: Vec<String>,
}

fn default_assets_source() -> String {
    "src/assets".to_string()
}

fn default_assets_dest() -> String {
    "dist/assets".to_string()
}

fn default_assets_index() -> String {
    "src/index.html".to_string()
}

fn default_assets_index_dest() -> String {
    "dist/index.html".to_string()
}

fn default_assets_exclude() -> Vec<String> {
    vec!["**/*.js".to_string(), "**/*.css".to_string()]
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            source: default_assets_source(),
            dest: default_assets_dest(),
            index: default_assets_index(),
            index_dest: default_assets_index_dest(),
            exclude: default_assets_exclude(),
        }
    }
}

/// `[server]` section.
///
/// `buildwatch` does not serve files itself; these settings are validated and
/// handed to whatever dev server fronts the output tree.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    /// Directory served as the site root.
    #[serde(default = "default_server_root")]
    pub root: String,

    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Extra mount points as `[url_prefix, directory]` pairs.
    #[serde(default = "default_server_mounts")]
    pub mounts: Vec<(String, String)>,
}

fn default_server_root() -> String {
    "dist".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_server_mounts() -> Vec<(String, String)> {
    vec![("/node_modules".to_string(), "./node_modules".to_string())]
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            root: default_server_root(),
            host: default_server_host(),
            port: default_server_port(),
            mounts: default_server_mounts(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Globs whose matches are dropped before they reach a coordinator.
    ///
    /// Defaults cover editor temp/swap files, which otherwise trigger spurious
    /// rebuilds on every keystroke in some editors.
    #[serde(default = "default_watch_exclude")]
    pub exclude: Vec<String>,

    /// Delay before the slow full-verification pass after a successful
    /// rebuild, in milliseconds.
    #[serde(default = "default_verify_delay_ms")]
    pub verify_delay_ms: u64,
}

fn default_watch_exclude() -> Vec<String> {
    vec![
        "**/*.swp".to_string(),
        "**/*.swo".to_string(),
        "**/*~".to_string(),
        "**/.#*".to_string(),
    ]
}

fn default_verify_delay_ms() -> u64 {
    1000
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            exclude: default_watch_exclude(),
            verify_delay_ms: default_verify_delay_ms(),
        }
    }
}
