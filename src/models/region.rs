use serde::Serialize;
use std::fmt;

/// Rectangular latitude/longitude box used for region membership.
///
/// Edges are inclusive. Longitudes are not wrapped, so a box may extend past
/// 180 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lon {:.1}..{:.1}, lat {:.1}..{:.1}",
            self.min_lon, self.max_lon, self.min_lat, self.max_lat
        )
    }
}

/// The seven fixed geographic regions, each backed by its own table.
///
/// Serializes as its table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    #[serde(rename = "Africa_MiddleEast_Meteorites")]
    AfricaMiddleEast,
    #[serde(rename = "Europe_Meteorites")]
    Europe,
    #[serde(rename = "Upper_Asia_Meteorites")]
    UpperAsia,
    #[serde(rename = "Lower_Asia_Meteorites")]
    LowerAsia,
    #[serde(rename = "Australia_Meteorites")]
    Australia,
    #[serde(rename = "North_America_Meteorites")]
    NorthAmerica,
    #[serde(rename = "South_America_Meteorites")]
    SouthAmerica,
}

impl Region {
    /// Every region in classification order.
    pub const ALL: [Region; 7] = [
        Region::AfricaMiddleEast,
        Region::Europe,
        Region::UpperAsia,
        Region::LowerAsia,
        Region::Australia,
        Region::NorthAmerica,
        Region::SouthAmerica,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            Region::AfricaMiddleEast => "Africa_MiddleEast_Meteorites",
            Region::Europe => "Europe_Meteorites",
            Region::UpperAsia => "Upper_Asia_Meteorites",
            Region::LowerAsia => "Lower_Asia_Meteorites",
            Region::Australia => "Australia_Meteorites",
            Region::NorthAmerica => "North_America_Meteorites",
            Region::SouthAmerica => "South_America_Meteorites",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::AfricaMiddleEast => "Africa & Middle East",
            Region::Europe => "Europe",
            Region::UpperAsia => "Upper Asia",
            Region::LowerAsia => "Lower Asia",
            Region::Australia => "Australia",
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Region::AfricaMiddleEast => BoundingBox::new(-17.8, -35.2, 62.2, 37.6),
            Region::Europe => BoundingBox::new(-24.1, 36.0, 32.0, 71.1),
            Region::UpperAsia => BoundingBox::new(32.2, 35.8, 190.4, 72.7),
            Region::LowerAsia => BoundingBox::new(58.2, -9.9, 154.0, 38.6),
            Region::Australia => BoundingBox::new(112.9, -43.8, 154.3, -11.1),
            Region::NorthAmerica => BoundingBox::new(-168.2, 12.8, -52.0, 71.5),
            Region::SouthAmerica => BoundingBox::new(-81.2, -55.8, -34.4, 12.6),
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.bounding_box().contains(latitude, longitude)
    }

    /// All regions whose box contains the point, in `ALL` order.
    pub fn containing(latitude: f64, longitude: f64) -> impl Iterator<Item = Region> {
        Region::ALL
            .into_iter()
            .filter(move |region| region.contains(latitude, longitude))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn regions_at(latitude: f64, longitude: f64) -> Vec<Region> {
        Region::containing(latitude, longitude).collect()
    }

    #[test]
    fn test_serializes_as_table_name() {
        for region in Region::ALL {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json, format!("\"{}\"", region.table_name()));
        }
    }

    #[test]
    fn test_table_names_are_unique() {
        let names: HashSet<&str> = Region::ALL.iter().map(|r| r.table_name()).collect();
        assert_eq!(names.len(), 7);
        assert!(names.iter().all(|n| n.ends_with("_Meteorites")));
    }

    #[test]
    fn test_all_order_is_stable() {
        assert_eq!(Region::ALL[0].table_name(), "Africa_MiddleEast_Meteorites");
        assert_eq!(Region::ALL[6].table_name(), "South_America_Meteorites");
    }

    #[test]
    fn test_single_region_membership() {
        assert_eq!(regions_at(10.0, 0.0), vec![Region::AfricaMiddleEast]);
        assert_eq!(regions_at(50.0, 40.0), vec![Region::UpperAsia]);
        assert_eq!(regions_at(-25.0, 134.0), vec![Region::Australia]);
        assert_eq!(regions_at(40.0, -100.0), vec![Region::NorthAmerica]);
        assert_eq!(regions_at(-15.0, -60.0), vec![Region::SouthAmerica]);
        assert_eq!(regions_at(48.8, 2.3), vec![Region::Europe]);
    }

    #[test]
    fn test_overlapping_boxes_fan_out() {
        assert_eq!(
            regions_at(37.0, 10.0),
            vec![Region::AfricaMiddleEast, Region::Europe]
        );
        assert_eq!(
            regions_at(37.0, 60.0),
            vec![Region::AfricaMiddleEast, Region::UpperAsia, Region::LowerAsia]
        );
        assert_eq!(
            regions_at(38.0, 100.0),
            vec![Region::UpperAsia, Region::LowerAsia]
        );
    }

    #[test]
    fn test_points_outside_every_box() {
        assert!(regions_at(-80.0, 0.0).is_empty()); // Antarctica
        assert!(regions_at(0.0, -30.0).is_empty()); // mid-Atlantic
        assert!(regions_at(91.0, 0.0).is_empty());
    }

    #[test]
    fn test_edges_are_inclusive() {
        let bbox = Region::Australia.bounding_box();
        assert!(bbox.contains(bbox.min_lat, bbox.min_lon));
        assert!(bbox.contains(bbox.max_lat, bbox.max_lon));
        assert!(!bbox.contains(bbox.max_lat + 0.01, bbox.max_lon));
    }

    #[test]
    fn test_non_finite_points_match_nothing() {
        assert!(regions_at(f64::NAN, 0.0).is_empty());
        assert!(regions_at(10.0, f64::NAN).is_empty());
        assert!(regions_at(f64::INFINITY, 0.0).is_empty());
        assert!(regions_at(10.0, f64::NEG_INFINITY).is_empty());
    }

    #[test]
    fn test_upper_asia_extends_past_antimeridian() {
        assert!(Region::UpperAsia.contains(65.0, 185.0));
        assert!(!Region::UpperAsia.contains(65.0, -175.0));
    }
}
