//! Country codes: map-click resolution and display names.

/// Dataset code of the aggregated EU27 figures, shown when nothing is selected.
pub const EU_AGGREGATE: &str = "EU27_2020";

/// Boundary layer code for the United Kingdom; the dataset uses `GB`.
const BOUNDARY_UK: &str = "UK";
const DATASET_UK: &str = "GB";

const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("AT", "Autriche"),
    ("BE", "Belgique"),
    ("CZ", "République tchèque"),
    ("DK", "Danemark"),
    ("FI", "Finlande"),
    ("FR", "France"),
    ("DE", "Allemagne"),
    ("GR", "Grèce"),
    ("HU", "Hongrie"),
    ("IS", "Islande"),
    ("IE", "Irlande"),
    ("IT", "Italie"),
    ("LU", "Luxembourg"),
    ("NL", "Pays-Bas"),
    ("NO", "Norvège"),
    ("PL", "Pologne"),
    ("PT", "Portugal"),
    ("SK", "Slovaquie"),
    ("ES", "Espagne"),
    ("SE", "Suède"),
    ("TR", "Turquie"),
    ("GB", "Royaume-Uni"),
    ("EE", "Estonie"),
    ("SI", "Slovénie"),
    ("LV", "Lettonie"),
    ("LT", "Lituanie"),
    (EU_AGGREGATE, "Union Européenne"),
];

/// Resolve a map click to a dataset country code. No click selects the EU
/// aggregate; the boundary layer's `UK` becomes `GB`; other codes pass through.
pub fn resolve_location(location: Option<&str>) -> String {
    match location.map(str::trim) {
        None | Some("") => EU_AGGREGATE.to_string(),
        Some(BOUNDARY_UK) => DATASET_UK.to_string(),
        Some(code) => code.to_string(),
    }
}

/// Inverse of the UK rule: the feature id the boundary layer uses for a dataset code.
pub fn boundary_code(country: &str) -> &str {
    if country == DATASET_UK {
        BOUNDARY_UK
    } else {
        country
    }
}

/// French display name, falling back to the code itself.
pub fn display_name(country: &str) -> &str {
    COUNTRY_NAMES
        .iter()
        .find(|(code, _)| *code == country)
        .map_or(country, |(_, name)| name)
}
