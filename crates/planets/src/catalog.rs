//! Planet catalog: dimension id → tier, orbit dimension and display name.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use engine_core::DimensionId;
use serde::{Deserialize, Serialize};

use crate::{read_ron, CatalogError};

/// A travelable dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    /// Dimension the planet surface lives in.
    pub dimension: DimensionId,
    /// Dimension its space stations are built in, if separate from the surface.
    #[serde(default)]
    pub orbit: Option<DimensionId>,
    /// Rocket tier needed to reach it.
    pub tier: u32,
    /// Human-readable name. Falls back to [`Planet::name_key`] when absent.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Planet {
    pub fn new(dimension: DimensionId, orbit: Option<DimensionId>, tier: u32, display_name: &str) -> Self {
        Self {
            dimension,
            orbit,
            tier,
            display_name: Some(display_name.to_string()),
        }
    }

    /// The orbit dimension, or the planet's own dimension when it has none.
    pub fn orbit_if_present(&self) -> &DimensionId {
        self.orbit.as_ref().unwrap_or(&self.dimension)
    }

    /// Translation key for the planet name, `planet.<namespace>.<path>`.
    pub fn name_key(&self) -> String {
        format!("planet.{}.{}", self.dimension.namespace(), self.dimension.path())
    }

    pub fn name(&self) -> String {
        self.display_name.clone().unwrap_or_else(|| self.name_key())
    }
}

/// Read-only lookup of every planet known to the world.
#[derive(Debug, Clone, Default)]
pub struct PlanetCatalog {
    planets: BTreeMap<DimensionId, Planet>,
}

impl PlanetCatalog {
    /// Build a catalog, rejecting two planets with the same dimension.
    pub fn from_planets(planets: impl IntoIterator<Item = Planet>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for planet in planets {
            let dimension = planet.dimension.clone();
            if map.insert(dimension.clone(), planet).is_some() {
                return Err(CatalogError::DuplicatePlanet(dimension));
            }
        }
        Ok(Self { planets: map })
    }

    /// Load a RON list of planets.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let planets: Vec<Planet> = read_ron(path)?;
        let catalog = Self::from_planets(planets)?;
        log::info!("Loaded {} planets from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// The built-in solar system.
    pub fn defaults() -> Self {
        let planet = |path: &str, orbit: Option<&str>, tier, name| {
            Planet::new(DimensionId::new(path), orbit.map(DimensionId::new), tier, name)
        };
        let planets = vec![
            planet("earth", Some("earth_orbit"), 1, "Earth"),
            planet("moon", Some("moon_orbit"), 1, "Moon"),
            planet("mars", Some("mars_orbit"), 2, "Mars"),
            planet("venus", Some("venus_orbit"), 3, "Venus"),
            planet("mercury", Some("mercury_orbit"), 3, "Mercury"),
            planet("glacio", Some("glacio_orbit"), 4, "Glacio"),
        ];
        let planets = planets.into_iter().map(|p| (p.dimension.clone(), p)).collect();
        Self { planets }
    }

    pub fn get(&self, dimension: &DimensionId) -> Option<&Planet> {
        self.planets.get(dimension)
    }

    pub fn planets(&self) -> impl Iterator<Item = &Planet> {
        self.planets.values()
    }

    /// Every dimension the catalog mentions: planet surfaces and orbits.
    pub fn dimensions(&self) -> Vec<DimensionId> {
        let mut dims: Vec<DimensionId> = self
            .planets
            .values()
            .flat_map(|p| std::iter::once(p.dimension.clone()).chain(p.orbit.clone()))
            .collect();
        dims.sort();
        dims.dedup();
        dims
    }

    /// Planets ordered by tier, then display name.
    pub fn sorted(&self) -> Vec<&Planet> {
        let mut planets: Vec<&Planet> = self.planets.values().collect();
        planets.sort_by(|a, b| compare_for_menu(a, b));
        planets
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}

fn compare_for_menu(a: &Planet, b: &Planet) -> Ordering {
    a.tier.cmp(&b.tier).then_with(|| a.name().cmp(&b.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_falls_back_to_surface() {
        let with = Planet::new(DimensionId::new("moon"), Some(DimensionId::new("moon_orbit")), 1, "Moon");
        let without = Planet::new(DimensionId::new("glacio"), None, 4, "Glacio");
        assert_eq!(with.orbit_if_present(), &DimensionId::new("moon_orbit"));
        assert_eq!(without.orbit_if_present(), &DimensionId::new("glacio"));
    }

    #[test]
    fn name_key_uses_namespace_and_path() {
        let planet = Planet {
            dimension: DimensionId::new("orbital:mars"),
            orbit: None,
            tier: 2,
            display_name: None,
        };
        assert_eq!(planet.name_key(), "planet.orbital.mars");
        assert_eq!(planet.name(), "planet.orbital.mars");
    }

    #[test]
    fn sorted_by_tier_then_name() {
        let catalog = PlanetCatalog::defaults();
        let names: Vec<String> = catalog.sorted().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Earth", "Moon", "Mars", "Mercury", "Venus", "Glacio"]);
    }

    #[test]
    fn duplicate_planets_rejected() {
        let earth = Planet::new(DimensionId::new("earth"), None, 1, "Earth");
        let err = PlanetCatalog::from_planets(vec![earth.clone(), earth]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePlanet(d) if d == DimensionId::new("earth")));
    }

    #[test]
    fn dimensions_include_orbits() {
        let catalog = PlanetCatalog::defaults();
        let dims = catalog.dimensions();
        assert!(dims.contains(&DimensionId::new("earth")));
        assert!(dims.contains(&DimensionId::new("earth_orbit")));
        assert_eq!(dims.len(), 12);
    }

    #[test]
    fn parses_ron_planet_list() {
        let data = r#"[
            (dimension: "orbital:earth", orbit: Some("orbital:earth_orbit"), tier: 1, display_name: Some("Earth")),
            (dimension: "orbital:glacio", tier: 4),
        ]"#;
        let planets: Vec<Planet> = ron::from_str(data).unwrap();
        let catalog = PlanetCatalog::from_planets(planets).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(&DimensionId::new("glacio")).unwrap().orbit, None);
    }

    #[test]
    fn bare_ids_in_files_get_default_namespace() {
        let data = r#"[(dimension: "venus", orbit: Some("venus_orbit"), tier: 3)]"#;
        let planets: Vec<Planet> = ron::from_str(data).unwrap();
        let catalog = PlanetCatalog::from_planets(planets).unwrap();
        let venus = catalog.get(&DimensionId::new("venus")).unwrap();
        assert_eq!(venus.orbit_if_present(), &DimensionId::new("venus_orbit"));
        assert_eq!(venus.name_key(), "planet.orbital.venus");
    }
}
