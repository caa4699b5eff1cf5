use serde::Deserialize;

const DEFAULT_PALETTE: &[&str] = &[
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe", "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000", "#aaffc3",
    "#808000", "#ffd8b1", "#000075", "#808080", "#ffffff", "#000000",
];

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub charts: ChartsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    #[serde(default = "default_data_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartsConfig {
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "default_heatmap_row_height")]
    pub heatmap_row_height: u32,
    /// Upper bound for charts whose height grows with the metric count
    #[serde(default = "default_max_chart_height")]
    pub max_chart_height: u32,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            heatmap_row_height: default_heatmap_row_height(),
            max_chart_height: default_max_chart_height(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl ChartsConfig {
    /// Color for the metric at `index`, cycling through the palette.
    pub fn color(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string();
        }
        self.palette[index % self.palette.len()].clone()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_data_path() -> String {
    "data/5G_NR_data.csv".to_string()
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

fn default_heatmap_row_height() -> u32 {
    360
}

fn default_max_chart_height() -> u32 {
    2880
}

fn default_histogram_bins() -> usize {
    20
}

/// Load `config/dashboard.{toml,yaml,json}` if present, then apply
/// `KPI_DASHBOARD__SECTION__KEY` environment overrides.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("KPI_DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
