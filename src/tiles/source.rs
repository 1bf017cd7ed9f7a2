use crate::core::geo::TileCoord;
use crate::{MapError, Result};

/// Trait representing anything that can produce tile URLs for a given coordinate.
/// The engine only builds addresses; fetching is up to the host.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;

    /// Attribution text the host should display next to the map
    fn attribution(&self) -> &str {
        ""
    }
}

/// Leaflet-style URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplateSource {
    template: String,
    subdomains: Vec<String>,
    attribution: String,
}

impl UrlTemplateSource {
    /// Fails when the template lacks any of `{z}`, `{x}`, `{y}`, or uses `{s}`
    /// without subdomains.
    pub fn new(template: impl Into<String>, subdomains: &[&str]) -> Result<Self> {
        let template = template.into();
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !template.contains(placeholder) {
                return Err(MapError::InvalidTemplate(format!(
                    "{template}: missing {placeholder}"
                )));
            }
        }
        if template.contains("{s}") && subdomains.is_empty() {
            return Err(MapError::InvalidTemplate(format!(
                "{template}: uses {{s}} but no subdomains were given"
            )));
        }

        Ok(Self {
            template,
            subdomains: subdomains.iter().map(|s| s.to_string()).collect(),
            attribution: String::new(),
        })
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Spreads requests over subdomains; adjacent tiles land on different hosts
    fn subdomain(&self, coord: TileCoord) -> &str {
        if self.subdomains.is_empty() {
            return "";
        }
        let idx = ((u64::from(coord.x) + u64::from(coord.y)) % self.subdomains.len() as u64) as usize;
        &self.subdomains[idx]
    }
}

impl TileSource for UrlTemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{s}", self.subdomain(coord))
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }

    fn attribution(&self) -> &str {
        &self.attribution
    }
}

/// Simple implementation that hits the default OpenStreetMap tile server.
#[derive(Debug, Clone, Default)]
pub struct OpenStreetMapSource;

impl OpenStreetMapSource {
    pub fn new() -> Self {
        Self
    }
}

impl TileSource for OpenStreetMapSource {
    fn url(&self, coord: TileCoord) -> String {
        format!("https://tile.openstreetmap.org/{coord}.png")
    }

    fn attribution(&self) -> &str {
        "© OpenStreetMap contributors"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openstreetmap_url() {
        let source = OpenStreetMapSource::new();
        assert_eq!(
            source.url(TileCoord::new(164, 100, 8)),
            "https://tile.openstreetmap.org/8/164/100.png"
        );
        assert!(!source.attribution().is_empty());
    }

    #[test]
    fn test_template_substitution_and_subdomains() {
        let source =
            UrlTemplateSource::new("https://{s}.example.com/{z}/{x}/{y}@2x.png", &["a", "b", "c"])
                .unwrap()
                .with_attribution("Example");

        assert_eq!(
            source.url(TileCoord::new(1, 2, 3)),
            "https://a.example.com/3/1/2@2x.png"
        );
        assert_eq!(
            source.url(TileCoord::new(2, 2, 3)),
            "https://b.example.com/3/2/2@2x.png"
        );
        assert_eq!(source.attribution(), "Example");
    }

    #[test]
    fn test_template_without_subdomains() {
        let source = UrlTemplateSource::new("tiles/{z}/{y}/{x}.pbf", &[]).unwrap();
        assert_eq!(source.url(TileCoord::new(7, 9, 4)), "tiles/4/9/7.pbf");
    }

    #[test]
    fn test_invalid_templates() {
        assert!(matches!(
            UrlTemplateSource::new("https://example.com/{z}/{x}.png", &[]),
            Err(MapError::InvalidTemplate(_))
        ));
        assert!(matches!(
            UrlTemplateSource::new("https://{s}.example.com/{z}/{x}/{y}.png", &[]),
            Err(MapError::InvalidTemplate(_))
        ));
    }
}
