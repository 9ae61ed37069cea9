use crate::error;
use crate::primitives::{BoundingBox2D, Coordinate2D};
use crate::spatial_reference::SpatialReference;
use crate::util::Result;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Formatter;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A coordinate reference system with its valid extent.
///
/// Projections are identified by their code, i.e. two projections are equal
/// iff their spatial references are equal.
#[derive(Debug, Clone)]
pub struct Projection {
    spatial_reference: SpatialReference,
    extent: BoundingBox2D,
    crs_uri: String,
}

impl Projection {
    pub fn new(spatial_reference: SpatialReference, extent: BoundingBox2D) -> Self {
        Self {
            spatial_reference,
            extent,
            crs_uri: spatial_reference.crs_uri(),
        }
    }

    /// WGS 84
    pub fn wgs_84() -> Self {
        Self::new(
            SpatialReference::epsg_4326(),
            BoundingBox2D::new_unchecked(
                Coordinate2D::new(-180., -90.),
                Coordinate2D::new(180., 90.),
            ),
        )
    }

    /// Web Mercator
    pub fn web_mercator() -> Self {
        const BOUND: f64 = 20_037_508.34;

        Self::new(
            SpatialReference::epsg_3857(),
            BoundingBox2D::new_unchecked(
                Coordinate2D::new(-BOUND, -BOUND),
                Coordinate2D::new(BOUND, BOUND),
            ),
        )
    }

    /// GEOS projection of the Meteosat Second Generation satellites
    pub fn geos_msg() -> Self {
        const BOUND: f64 = 5_568_748.276;

        Self::new(
            SpatialReference::sr_org_81(),
            BoundingBox2D::new_unchecked(
                Coordinate2D::new(-BOUND, -BOUND),
                Coordinate2D::new(BOUND, BOUND),
            ),
        )
    }

    pub fn built_ins() -> [Projection; 3] {
        [Self::wgs_84(), Self::web_mercator(), Self::geos_msg()]
    }

    /// Looks up a built-in projection by its code, e.g. `EPSG:4326`
    pub fn from_code(code: &str) -> Result<Self> {
        let spatial_reference: SpatialReference = code
            .parse()
            .map_err(|_| error::Error::UnknownProjection { code: code.into() })?;

        Self::built_ins()
            .into_iter()
            .find(|projection| projection.spatial_reference == spatial_reference)
            .ok_or_else(|| error::Error::UnknownProjection { code: code.into() })
    }

    pub fn spatial_reference(&self) -> SpatialReference {
        self.spatial_reference
    }

    pub fn code(&self) -> String {
        self.spatial_reference.to_string()
    }

    pub fn extent(&self) -> BoundingBox2D {
        self.extent
    }

    pub fn crs_uri(&self) -> &str {
        &self.crs_uri
    }

    /// `EPSG:4326` is requested in latitude/longitude axis order
    pub fn has_swapped_axis_order(&self) -> bool {
        self.spatial_reference == SpatialReference::epsg_4326()
    }

    /// Formats `bbox` in the axis order that requests in this projection expect
    ///
    /// # Examples
    ///
    /// ```
    /// use wave_datatypes::primitives::BoundingBox2D;
    /// use wave_datatypes::projection::Projection;
    ///
    /// let bbox = BoundingBox2D::from_extent([10., 20., 30., 40.]).unwrap();
    ///
    /// assert_eq!(Projection::wgs_84().to_bbox_string(&bbox), "20,10,40,30");
    /// assert_eq!(Projection::web_mercator().to_bbox_string(&bbox), "10,20,30,40");
    /// ```
    pub fn to_bbox_string(&self, bbox: &BoundingBox2D) -> String {
        bbox.to_axis_ordered_string(self.has_swapped_axis_order())
    }
}

impl PartialEq for Projection {
    fn eq(&self, other: &Self) -> bool {
        self.spatial_reference == other.spatial_reference
    }
}

impl Eq for Projection {}

impl Hash for Projection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.spatial_reference.hash(state);
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spatial_reference)
    }
}

impl FromStr for Projection {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl Serialize for Projection {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.code())
    }
}

/// Helper struct for deserializing a `Projection`
struct ProjectionDeserializeVisitor;

impl Visitor<'_> for ProjectionDeserializeVisitor {
    type Value = Projection;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a known projection code in the form authority:code")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        v.parse().map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Projection {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ProjectionDeserializeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code() {
        assert_eq!(Projection::from_code("EPSG:4326").unwrap(), Projection::wgs_84());
        assert_eq!(
            Projection::from_code("EPSG:3857").unwrap(),
            Projection::web_mercator()
        );
        assert_eq!(Projection::from_code("SR-ORG:81").unwrap(), Projection::geos_msg());

        assert!(matches!(
            Projection::from_code("EPSG:32632"),
            Err(error::Error::UnknownProjection { .. })
        ));
        assert!(Projection::from_code("foo").is_err());
    }

    #[test]
    fn equality_by_code() {
        let custom_extent = Projection::new(
            SpatialReference::epsg_4326(),
            BoundingBox2D::from_extent([0., 0., 1., 1.]).unwrap(),
        );

        assert_eq!(custom_extent, Projection::wgs_84());
        assert_ne!(Projection::wgs_84(), Projection::web_mercator());
    }

    #[test]
    fn serde() {
        assert_eq!(
            serde_json::to_string(&Projection::web_mercator()).unwrap(),
            "\"EPSG:3857\""
        );
        assert_eq!(
            serde_json::from_str::<Projection>("\"SR-ORG:81\"").unwrap(),
            Projection::geos_msg()
        );
        assert!(serde_json::from_str::<Projection>("\"EPSG:1\"").is_err());
    }

    #[test]
    fn bbox_axis_order() {
        let bbox = BoundingBox2D::from_extent([10., 20., 30., 40.]).unwrap();

        assert_eq!(Projection::wgs_84().to_bbox_string(&bbox), "20,10,40,30");
        assert_eq!(Projection::web_mercator().to_bbox_string(&bbox), "10,20,30,40");
        assert_eq!(Projection::geos_msg().to_bbox_string(&bbox), "10,20,30,40");
    }

    #[test]
    fn crs_uri() {
        assert_eq!(
            Projection::web_mercator().crs_uri(),
            "http://www.opengis.net/def/crs/EPSG/0/3857"
        );
    }
}
