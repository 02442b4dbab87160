//! Page rendering with minijinja.

use maglev_common::{Arrow, ArrowSet, AssetConfig, ParameterSet};
use minijinja::{Environment, Value};
use serde::Serialize;

pub const PAGE_TEMPLATE: &str = "mag_in.html";

pub const CAPTION_INPUT: &str = "Fig.1 - Parameters of levitated cylinders";
pub const CAPTION_RESULT: &str = "Fig.2 - Schematic of predicted results";

/// Force shown on the entry page next to the default parameters.
pub const DEFAULT_FORCE: f32 = 11.546;

/// Values handed to `mag_in.html`. Numbers are pre-formatted so the page
/// echoes `1` rather than `1.0` and never shows widened f32 noise. Image URLs
/// come from the config and are marked safe so auto-escaping leaves the
/// slashes alone.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    #[serde(rename = "Fig")]
    pub caption: String,
    pub figure_geo: Value,
    #[serde(rename = "arrow_J")]
    pub arrow_j: Value,
    #[serde(rename = "arrow_J_1")]
    pub arrow_j1: Value,
    #[serde(rename = "arrow_F")]
    pub arrow_f: Value,
    #[serde(rename = "J")]
    pub j: String,
    #[serde(rename = "R")]
    pub r: String,
    pub h: String,
    #[serde(rename = "J_1")]
    pub j1: String,
    #[serde(rename = "R_1")]
    pub r1: String,
    #[serde(rename = "h_1")]
    pub h1: String,
    pub xi: String,
    pub predicted_force: String,
}

impl PageContext {
    pub fn new(
        caption: &str,
        params: &ParameterSet,
        force: f32,
        arrows: &ArrowSet,
        assets: &AssetConfig,
    ) -> Self {
        let url = |file: &str| Value::from_safe_string(assets.image_url(file));
        let arrow = |a: Arrow| match a {
            Arrow::Plus => url(&assets.plus_arrow),
            Arrow::Minus => url(&assets.minus_arrow),
        };

        Self {
            caption: caption.to_string(),
            figure_geo: url(&assets.figure),
            arrow_j: arrow(arrows.j),
            arrow_j1: arrow(arrows.j1),
            arrow_f: arrow(arrows.force),
            j: params.j.to_string(),
            r: params.r.to_string(),
            h: params.h.to_string(),
            j1: params.j1.to_string(),
            r1: params.r1.to_string(),
            h1: params.h1.to_string(),
            xi: params.xi.to_string(),
            predicted_force: force.to_string(),
        }
    }

    /// The entry page: default parameters and the matching example force.
    pub fn defaults(assets: &AssetConfig) -> Self {
        let params = ParameterSet::default();
        let arrows = ArrowSet::from_signs(params.j, params.j1, DEFAULT_FORCE);
        Self::new(CAPTION_INPUT, &params, DEFAULT_FORCE, &arrows, assets)
    }
}

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE, include_str!("../templates/mag_in.html"))?;
        Ok(Self { env })
    }

    pub fn render_page(&self, ctx: &PageContext) -> Result<String, minijinja::Error> {
        self.env.get_template(PAGE_TEMPLATE)?.render(ctx)
    }
}
