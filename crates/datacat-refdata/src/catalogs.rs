// SPDX-License-Identifier: Apache-2.0

//! Catalog-type and software-family mapping tables.

use datacat_model::CatalogType;

/// On-disk kind subdirectory for a catalog type.
#[must_use]
pub const fn catalog_type_subdir(catalog_type: CatalogType) -> &'static str {
    match catalog_type {
        CatalogType::OpenDataPortal => "opendata",
        CatalogType::Geoportal => "geo",
        CatalogType::ScientificDataRepository => "scientific",
        CatalogType::IndicatorsCatalog => "indicators",
        CatalogType::MicrodataCatalog => "microdata",
        CatalogType::MachineLearningCatalog => "ml",
        CatalogType::DataSearchEngine => "search",
        CatalogType::ApiCatalog => "api",
        CatalogType::DataMarketplace => "marketplace",
        CatalogType::MetadataCatalog => "metadata",
        CatalogType::Other => "other",
    }
}

#[must_use]
pub fn subdir_catalog_type(dir: &str) -> Option<CatalogType> {
    CatalogType::ALL
        .into_iter()
        .find(|t| catalog_type_subdir(*t) == dir)
}

/// Default catalog type a software family implies. Fallback is the plain
/// open data portal.
#[must_use]
pub fn software_catalog_type(software_id: &str) -> CatalogType {
    match software_id {
        "geonetwork" | "ogc" | "stac" => CatalogType::Geoportal,
        "dataverse" | "inveniordm" | "dspace" => CatalogType::ScientificDataRepository,
        "nada" => CatalogType::MicrodataCatalog,
        "opensdg" => CatalogType::IndicatorsCatalog,
        _ => CatalogType::OpenDataPortal,
    }
}

/// Whether a software family implies map layers among the content types.
#[must_use]
pub fn software_implies_map_layer(software_id: &str) -> bool {
    software_catalog_type(software_id) == CatalogType::Geoportal
}

#[cfg(test)]
mod tests {
    use super::{catalog_type_subdir, software_catalog_type, subdir_catalog_type};
    use datacat_model::CatalogType;

    #[test]
    fn subdir_round_trip() {
        for t in CatalogType::ALL {
            assert_eq!(subdir_catalog_type(catalog_type_subdir(t)), Some(t));
        }
    }

    #[test]
    fn software_defaults() {
        assert_eq!(software_catalog_type("ckan"), CatalogType::OpenDataPortal);
        assert_eq!(software_catalog_type("geonetwork"), CatalogType::Geoportal);
        assert_eq!(
            software_catalog_type("nada"),
            CatalogType::MicrodataCatalog
        );
        assert_eq!(
            software_catalog_type("somethingelse"),
            CatalogType::OpenDataPortal
        );
    }
}
