use std::fmt::{Display, Formatter};

use serde::Serialize;
use tera::{Context, Tera};

use crate::strategy::{Strategy, StrategyTable};

const WELCOME_TEMPLATE: &str = "pages/index.html";

const TEMPLATES: [(&str, &str); 10] = [
    ("layout.html", include_str!("../templates/layout.html")),
    ("partials/nav.html", include_str!("../templates/partials/nav.html")),
    ("partials/heading.html", include_str!("../templates/partials/heading.html")),
    ("partials/footer.html", include_str!("../templates/partials/footer.html")),
    ("partials/representation.html", include_str!("../templates/partials/representation.html")),
    (WELCOME_TEMPLATE, include_str!("../templates/pages/index.html")),
    ("pages/no-store.html", include_str!("../templates/pages/no-store.html")),
    ("pages/etag.html", include_str!("../templates/pages/etag.html")),
    ("pages/last-modified.html", include_str!("../templates/pages/last-modified.html")),
    ("pages/max-age.html", include_str!("../templates/pages/max-age.html")),
];

#[derive(Debug)]
pub struct RenderError(tera::Error);

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to render page: {:#?}", self.0)
    }
}

impl From<tera::Error> for RenderError {
    fn from(e: tera::Error) -> Self {
        RenderError(e)
    }
}

#[derive(Serialize)]
struct StepLink {
    step: usize,
    path: &'static str,
    title: String,
}

/// Everything a strategy page shows besides navigation.
pub struct Representation<'a> {
    pub data: &'a str,
    pub time: &'a str,
}

pub struct Renderer {
    tera: Tera,
    steps: Vec<StepLink>,
}

impl Renderer {
    pub fn new(table: &StrategyTable) -> Result<Renderer, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        let steps = Strategy::ALL
            .iter()
            .map(|strategy| StepLink {
                step: strategy.step(),
                path: strategy.path(),
                title: table.title(*strategy),
            })
            .collect();
        Ok(Renderer { tera, steps })
    }

    fn context(&self, title: &str, step: usize) -> Context {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("step", &step);
        context.insert("max_step", &Strategy::ALL.len());
        context.insert("steps", &self.steps);
        context.insert(
            "previous",
            &step.checked_sub(1).and_then(Strategy::from_step).map(|s| s.path()),
        );
        context.insert("next", &Strategy::from_step(step + 1).map(|s| s.path()));
        context
    }

    pub fn welcome(&self) -> Result<String, RenderError> {
        let context = self.context("Welcome", 0);
        Ok(self.tera.render(WELCOME_TEMPLATE, &context)?)
    }

    pub fn strategy(&self, strategy: Strategy, title: &str, representation: &Representation) -> Result<String, RenderError> {
        let mut context = self.context(title, strategy.step());
        context.insert("data", representation.data);
        context.insert("time", representation.time);
        Ok(self.tera.render(&format!("pages/{}", strategy.template()), &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(&StrategyTable::default()).unwrap()
    }

    #[test]
    fn test_welcome_links_every_step() {
        let html = renderer().welcome().unwrap();
        assert!(html.contains("<title>Welcome | HTTP cache validation</title>"));
        for strategy in Strategy::ALL.iter() {
            assert!(html.contains(&format!("href=\"{}\"", strategy.path())));
        }
        assert!(html.contains("max-age=30"));
        assert!(!html.contains("Step 0"));
        assert!(html.contains("Next &rarr;"));
    }

    #[test]
    fn test_strategy_page() {
        let representation = Representation {
            data: "abcDEF123",
            time: "2022-03-14 15:09:26",
        };
        let html = renderer()
            .strategy(Strategy::ETag, "etag", &representation)
            .unwrap();
        assert!(html.contains("Step 2 of 4"));
        assert!(html.contains("abcDEF123"));
        assert!(html.contains("2022-03-14 15:09:26"));
        assert!(html.contains("href=\"/no-store\">&larr; Previous"));
        assert!(html.contains("href=\"/last-modified\">Next &rarr;"));
        assert!(html.contains("href=\"/etag\" class=\"active\""));
    }

    #[test]
    fn test_last_step_has_no_next() {
        let representation = Representation { data: "x", time: "t" };
        let html = renderer()
            .strategy(Strategy::MaxAge, "max-age=30", &representation)
            .unwrap();
        assert!(html.contains("Step 4 of 4"));
        assert!(!html.contains("Next &rarr;"));
        assert!(html.contains("cache-control: max-age=30"));
    }

    #[test]
    fn test_every_strategy_renders() {
        let renderer = renderer();
        let representation = Representation { data: "x", time: "t" };
        for strategy in Strategy::ALL.iter() {
            assert!(renderer.strategy(*strategy, "title", &representation).is_ok());
        }
    }
}
