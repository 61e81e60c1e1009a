//! Static description of the star and its planets.
//!
//! The catalog is validated once at construction and never mutated afterwards.
//! Planet data follows the orrery's built-in solar system: distances and
//! speeds are scene units, not astronomical ones.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{CatalogError, CatalogResult};

/// Eccentricity used for every built-in planet.
pub const DEFAULT_ECCENTRICITY: f32 = 0.0167;
/// Visual sphere radius of a planet.
pub const PLANET_RADIUS: f32 = 0.5;
/// Visual sphere radius of the star.
pub const STAR_RADIUS: f32 = 3.0;

/// Stable body name, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BodyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only metadata for the info panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyInfo {
    /// Orbital period in Earth days (0 for the star).
    pub year_length_days: f64,
    pub mass_kg: f64,
    pub radius_km: f64,
    /// Surface gravity in m/s².
    pub gravity: f32,
    pub satellites: Vec<String>,
    pub description: String,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub id: BodyId,
    /// Orbital radius at zero eccentricity.
    #[serde(default)]
    pub mean_distance: f32,
    /// Radians of orbital angle per simulated second.
    #[serde(default)]
    pub angular_speed: f32,
    #[serde(default = "default_eccentricity")]
    pub eccentricity: f32,
    /// Visual sphere radius, also used as the pick radius.
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default)]
    pub has_ring: bool,
    #[serde(default)]
    pub has_moon: bool,
    #[serde(default)]
    pub info: BodyInfo,
}

fn default_eccentricity() -> f32 {
    DEFAULT_ECCENTRICITY
}
fn default_radius() -> f32 {
    PLANET_RADIUS
}

impl BodyDescriptor {
    /// Planet with the default eccentricity and radius.
    pub fn planet(id: &str, mean_distance: f32, angular_speed: f32) -> Self {
        Self {
            id: BodyId::from(id),
            mean_distance,
            angular_speed,
            eccentricity: DEFAULT_ECCENTRICITY,
            radius: PLANET_RADIUS,
            has_ring: false,
            has_moon: false,
            info: BodyInfo::default(),
        }
    }

    /// Immobile star at the origin.
    pub fn star(id: &str) -> Self {
        Self {
            id: BodyId::from(id),
            mean_distance: 0.0,
            angular_speed: 0.0,
            eccentricity: 0.0,
            radius: STAR_RADIUS,
            has_ring: false,
            has_moon: false,
            info: BodyInfo::default(),
        }
    }

    pub fn with_ring(mut self) -> Self {
        self.has_ring = true;
        self
    }

    pub fn with_moon(mut self) -> Self {
        self.has_moon = true;
        self
    }

    pub fn with_eccentricity(mut self, eccentricity: f32) -> Self {
        self.eccentricity = eccentricity;
        self
    }

    pub fn with_info(mut self, info: BodyInfo) -> Self {
        self.info = info;
        self
    }

    fn validate_common(&self) -> CatalogResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(CatalogError::InvalidRadius {
                id: self.id.to_string(),
                radius: self.radius,
            });
        }
        Ok(())
    }

    fn validate_star(&self) -> CatalogResult<()> {
        self.validate_common()?;
        if self.mean_distance != 0.0 {
            return Err(CatalogError::StarNotAtOrigin {
                id: self.id.to_string(),
                distance: self.mean_distance,
            });
        }
        Ok(())
    }

    fn validate_planet(&self) -> CatalogResult<()> {
        self.validate_common()?;
        let id = || self.id.to_string();
        if !self.mean_distance.is_finite() || self.mean_distance <= 0.0 {
            return Err(CatalogError::InvalidDistance { id: id(), distance: self.mean_distance });
        }
        if !self.angular_speed.is_finite() || self.angular_speed <= 0.0 {
            return Err(CatalogError::InvalidAngularSpeed { id: id(), speed: self.angular_speed });
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(CatalogError::InvalidEccentricity { id: id(), eccentricity: self.eccentricity });
        }
        Ok(())
    }
}

/// On-disk catalog layout (RON).
#[derive(Debug, Deserialize)]
struct CatalogFile {
    star: BodyDescriptor,
    planets: Vec<BodyDescriptor>,
}

/// Validated star + planets.
#[derive(Debug, Clone)]
pub struct BodyCatalog {
    star: BodyDescriptor,
    planets: Vec<BodyDescriptor>,
}

impl BodyCatalog {
    /// Validate and build a catalog. Any malformed entry rejects the whole catalog.
    pub fn new(star: BodyDescriptor, planets: Vec<BodyDescriptor>) -> CatalogResult<Self> {
        star.validate_star()?;
        let mut seen = HashSet::new();
        seen.insert(star.id.clone());
        for planet in &planets {
            planet.validate_planet()?;
            if !seen.insert(planet.id.clone()) {
                return Err(CatalogError::DuplicateId(planet.id.to_string()));
            }
        }
        Ok(Self { star, planets })
    }

    /// Re-run validation on an already assembled catalog.
    pub fn validated(self) -> CatalogResult<Self> {
        Self::new(self.star, self.planets)
    }

    /// Parse and validate a RON catalog of the form `(star: (...), planets: [...])`.
    pub fn from_ron_str(source: &str) -> CatalogResult<Self> {
        let file: CatalogFile = ron::from_str(source)?;
        Self::new(file.star, file.planets)
    }

    pub fn star(&self) -> &BodyDescriptor {
        &self.star
    }

    pub fn star_id(&self) -> &BodyId {
        &self.star.id
    }

    pub fn planets(&self) -> &[BodyDescriptor] {
        &self.planets
    }

    /// Star first, then planets in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &BodyDescriptor> {
        std::iter::once(&self.star).chain(self.planets.iter())
    }

    pub fn get(&self, id: &BodyId) -> Option<&BodyDescriptor> {
        self.iter().find(|body| &body.id == id)
    }

    pub fn contains(&self, id: &BodyId) -> bool {
        self.get(id).is_some()
    }

    /// Number of bodies including the star. Never zero.
    pub fn body_count(&self) -> usize {
        self.planets.len() + 1
    }

    /// The built-in sun and eight planets.
    pub fn solar_system() -> Self {
        let info = |year: f64, mass: f64, radius: f64, gravity: f32, satellites: &[&str], description: &str| BodyInfo {
            year_length_days: year,
            mass_kg: mass,
            radius_km: radius,
            gravity,
            satellites: satellites.iter().map(|s| s.to_string()).collect(),
            description: description.to_string(),
        };

        let star = BodyDescriptor::star("Sun").with_info(info(
            0.0,
            1.989e30,
            696_340.0,
            274.0,
            &[],
            "The Sun is the star at the center of the Solar System. It is a nearly perfect sphere of hot plasma, and it provides light and heat to the planets in the solar system.",
        ));

        let planets = vec![
            BodyDescriptor::planet("Earth", 8.0, 0.02).with_moon().with_info(info(
                365.0, 5.972e24, 6371.0, 9.8, &["Moon"],
                "Earth is the third planet from the Sun and the only astronomical object known to harbor life. Approximately 71% of its surface is covered by water.",
            )),
            BodyDescriptor::planet("Mercury", 5.0, 0.04).with_info(info(
                88.0, 3.285e23, 2439.7, 3.7, &[],
                "Mercury is the smallest planet in the Solar System and the closest to the Sun. Its thin atmosphere leads to extreme temperature swings.",
            )),
            BodyDescriptor::planet("Venus", 6.5, 0.015).with_info(info(
                225.0, 4.867e24, 6051.8, 8.87, &[],
                "Venus has a thick, toxic atmosphere of carbon dioxide and sulfuric acid clouds, making it the hottest planet in the Solar System.",
            )),
            BodyDescriptor::planet("Mars", 10.0, 0.01).with_info(info(
                687.0, 6.39e23, 3389.5, 3.71, &["Phobos", "Deimos"],
                "Mars is the fourth planet from the Sun, called the Red Planet for the iron oxide on its surface. It hosts Olympus Mons and Valles Marineris.",
            )),
            BodyDescriptor::planet("Jupiter", 14.0, 0.008).with_info(info(
                4333.0, 1.898e27, 69911.0, 24.79, &["Io", "Europa", "Ganymede", "Callisto"],
                "Jupiter is the largest planet in the Solar System, a gas giant known for its Great Red Spot, a storm raging for hundreds of years.",
            )),
            BodyDescriptor::planet("Saturn", 18.0, 0.007).with_ring().with_info(info(
                10759.0, 5.683e26, 58232.0, 10.44, &["Titan", "Enceladus", "Rhea", "Iapetus"],
                "Saturn is best known for its extensive ring system of ice and rock particles. Its moon Titan has lakes of liquid methane.",
            )),
            BodyDescriptor::planet("Uranus", 22.0, 0.005).with_ring().with_info(info(
                30687.0, 8.681e25, 25362.0, 8.69, &["Miranda", "Ariel", "Umbriel", "Titania", "Oberon"],
                "Uranus rotates on its side, its axis nearly parallel to the plane of the Solar System, giving it extreme seasons.",
            )),
            BodyDescriptor::planet("Neptune", 26.0, 0.004).with_info(info(
                60190.0, 1.024e26, 24622.0, 11.15, &["Triton", "Proteus", "Nereid"],
                "Neptune is the farthest known planet from the Sun, with the strongest winds in the Solar System. Its moon Triton orbits retrograde.",
            )),
        ];

        Self { star, planets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_system_is_valid() {
        let catalog = BodyCatalog::solar_system().validated().unwrap();
        assert_eq!(catalog.body_count(), 9);
        assert_eq!(catalog.star_id().as_str(), "Sun");
    }

    #[test]
    fn solar_system_capabilities() {
        let catalog = BodyCatalog::solar_system();
        let with_moon: Vec<_> = catalog.planets().iter().filter(|p| p.has_moon).map(|p| p.id.as_str()).collect();
        let with_ring: Vec<_> = catalog.planets().iter().filter(|p| p.has_ring).map(|p| p.id.as_str()).collect();
        assert_eq!(with_moon, ["Earth"]);
        assert_eq!(with_ring, ["Saturn", "Uranus"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = BodyCatalog::new(
            BodyDescriptor::star("Sun"),
            vec![BodyDescriptor::planet("Mars", 10.0, 0.01), BodyDescriptor::planet("Mars", 12.0, 0.01)],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "Mars"));
    }

    #[test]
    fn rejects_planet_sharing_star_id() {
        let err = BodyCatalog::new(BodyDescriptor::star("Sun"), vec![BodyDescriptor::planet("Sun", 3.0, 0.1)]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(_)));
    }

    #[test]
    fn rejects_negative_distance() {
        let err = BodyCatalog::new(BodyDescriptor::star("Sun"), vec![BodyDescriptor::planet("Mars", -1.0, 0.01)]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDistance { .. }));
    }

    #[test]
    fn rejects_bad_eccentricity_and_speed() {
        let ecc = BodyDescriptor::planet("Mars", 10.0, 0.01).with_eccentricity(1.0);
        assert!(matches!(
            BodyCatalog::new(BodyDescriptor::star("Sun"), vec![ecc]).unwrap_err(),
            CatalogError::InvalidEccentricity { .. }
        ));
        let speed = BodyDescriptor::planet("Mars", 10.0, 0.0);
        assert!(matches!(
            BodyCatalog::new(BodyDescriptor::star("Sun"), vec![speed]).unwrap_err(),
            CatalogError::InvalidAngularSpeed { .. }
        ));
    }

    #[test]
    fn rejects_star_off_origin() {
        let mut star = BodyDescriptor::star("Sun");
        star.mean_distance = 2.0;
        assert!(matches!(BodyCatalog::new(star, vec![]).unwrap_err(), CatalogError::StarNotAtOrigin { .. }));
    }

    #[test]
    fn rejects_empty_id() {
        let err = BodyCatalog::new(BodyDescriptor::star("  "), vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyId));
    }

    #[test]
    fn parses_ron_with_defaults() {
        let source = r#"(
            star: (id: "Sol", radius: 3.0),
            planets: [
                (id: "Terra", mean_distance: 8.0, angular_speed: 0.02, has_moon: true),
                (id: "Ringed", mean_distance: 18.0, angular_speed: 0.007, has_ring: true, eccentricity: 0.05),
            ],
        )"#;
        let catalog = BodyCatalog::from_ron_str(source).unwrap();
        assert_eq!(catalog.body_count(), 3);
        let terra = catalog.get(&BodyId::from("Terra")).unwrap();
        assert_eq!(terra.eccentricity, DEFAULT_ECCENTRICITY);
        assert_eq!(terra.radius, PLANET_RADIUS);
        assert!(terra.has_moon);
    }

    #[test]
    fn ron_catalog_is_validated() {
        let source = r#"(star: (id: "Sol"), planets: [(id: "Bad", mean_distance: 0.0, angular_speed: 0.1)])"#;
        assert!(matches!(BodyCatalog::from_ron_str(source).unwrap_err(), CatalogError::InvalidDistance { .. }));
        assert!(matches!(BodyCatalog::from_ron_str("(star: ").unwrap_err(), CatalogError::Parse(_)));
    }
}
