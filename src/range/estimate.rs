//! Heuristic estimators for vehicle parameters missing from a data sheet.

use serde::Serialize;

/// Cd used when nothing else matches.
pub const DEFAULT_CD: f64 = 0.28;

/// Published manufacturer drag coefficients, checked in order.
///
/// Order matters: the first name contained in the query wins, so
/// `"Mercedes EQS SUV"` resolves to the `"Mercedes EQS"` entry.
pub const KNOWN_CD: &[(&str, f64)] = &[
    ("Tesla Model 3", 0.23),
    ("Tesla Model Y", 0.26),
    ("Tesla Model S", 0.208),
    ("Mercedes EQS", 0.20),
    ("Mercedes EQE", 0.22),
    ("Mercedes EQA", 0.28),
    ("Mercedes EQS SUV", 0.26),
    ("Mercedes EQE SUV", 0.25),
    ("BMW iX", 0.25),
    ("BMW i4", 0.24),
    ("BMW i5", 0.22),
    ("BMW i7", 0.24),
    ("BMW iX1", 0.26),
    ("BMW iX2", 0.26),
    ("Audi Q4 e-tron", 0.28),
    ("Audi Q6 e-tron", 0.28),
    ("Audi A6 e-tron", 0.21),
    ("Audi e-tron GT", 0.24),
    ("Volkswagen ID.3", 0.267),
    ("Volkswagen ID.4", 0.28),
    ("Volkswagen ID.5", 0.26),
    ("Volkswagen ID.7", 0.23),
    ("Volkswagen ID. Buzz", 0.285),
    ("Hyundai Ioniq 5", 0.288),
    ("Hyundai Ioniq 6", 0.21),
    ("Hyundai Kona", 0.27),
    ("Kia EV6", 0.267),
    ("Kia EV9", 0.28),
    ("Volvo EX30", 0.27),
    ("Volvo EX90", 0.29),
    ("Polestar 2", 0.278),
    ("Polestar 3", 0.29),
    ("Polestar 4", 0.269),
    ("Porsche Taycan", 0.22),
    ("Porsche Macan", 0.25),
    ("BYD SEAL", 0.219),
    ("BYD ATTO 3", 0.29),
    ("Lucid Air", 0.197),
    ("NIO ET7", 0.208),
    ("Renault 5", 0.28),
    ("Skoda Enyaq", 0.257),
    ("CUPRA Born", 0.267),
    ("Fiat 500e", 0.311),
    ("Ford Mustang Mach-E", 0.27),
    ("Smart #1", 0.29),
    ("Smart #3", 0.27),
];

/// Typical Cd per body style, checked in order as substrings.
pub const CD_BY_BODY: &[(&str, f64)] = &[
    ("sedan", 0.24),
    ("liftback", 0.24),
    ("fastback", 0.23),
    ("hatchback", 0.28),
    ("suv", 0.29),
    ("crossover", 0.28),
    ("mpv", 0.30),
    ("van", 0.32),
    ("coupe", 0.25),
    ("convertible", 0.31),
    ("wagon", 0.27),
    ("estate", 0.27),
];

/// Where a drag coefficient came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CdSource {
    /// Full model name found in the published table.
    Published,
    /// Brand and first model token found in the name.
    Matched,
    /// Derived from body style.
    Estimated,
    /// Nothing matched.
    Default,
}

/// Result of [`find_cd`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdLookup {
    /// Drag coefficient.
    pub cd: f64,
    /// Which lookup step produced `cd`.
    pub source: CdSource,
}

/// Normalised lookup inputs shared by all matchers.
struct CdQuery<'a> {
    name: String,
    body_type: Option<&'a str>,
}

type CdMatcher = fn(&CdQuery<'_>) -> Option<CdLookup>;

/// Matchers tried in priority order; the first hit wins.
const CD_MATCHERS: &[CdMatcher] = &[match_published, match_brand_model, match_body_type];

/// Lower-cases, turns hyphens into spaces and drops periods.
fn normalize(s: &str) -> String {
    s.to_lowercase().replace('-', " ").replace('.', "")
}

fn match_published(q: &CdQuery<'_>) -> Option<CdLookup> {
    KNOWN_CD.iter().find_map(|&(name, cd)| {
        q.name.contains(&normalize(name)).then_some(CdLookup {
            cd,
            source: CdSource::Published,
        })
    })
}

fn match_brand_model(q: &CdQuery<'_>) -> Option<CdLookup> {
    KNOWN_CD.iter().find_map(|&(name, cd)| {
        // Raw tokens: dotted designators like "id.3" never match a normalised query.
        let known = name.to_lowercase();
        let mut tokens = known.split(' ').filter(|t| !t.is_empty());
        let (brand, model) = (tokens.next()?, tokens.next()?);
        (q.name.contains(brand) && q.name.contains(model)).then_some(CdLookup {
            cd,
            source: CdSource::Matched,
        })
    })
}

fn match_body_type(q: &CdQuery<'_>) -> Option<CdLookup> {
    let body = q.body_type?.to_lowercase();
    CD_BY_BODY.iter().find_map(|&(key, cd)| {
        body.contains(key).then_some(CdLookup {
            cd,
            source: CdSource::Estimated,
        })
    })
}

/// Finds a drag coefficient by vehicle name, falling back to body style and
/// finally to [`DEFAULT_CD`].
pub fn find_cd(car_name: &str, body_type: Option<&str>) -> CdLookup {
    let query = CdQuery {
        name: normalize(car_name),
        body_type,
    };
    CD_MATCHERS
        .iter()
        .find_map(|matcher| matcher(&query))
        .unwrap_or(CdLookup {
            cd: DEFAULT_CD,
            source: CdSource::Default,
        })
}

/// Frontal area (m²) from overall width and height and a body-style shape factor.
pub fn estimate_frontal_area(width_mm: f64, height_mm: f64, body_type: Option<&str>) -> f64 {
    let w = width_mm / 1000.0;
    let h = height_mm / 1000.0;
    w * h * shape_factor(body_type)
}

fn shape_factor(body_type: Option<&str>) -> f64 {
    let Some(bt) = body_type.map(str::to_lowercase) else {
        return 0.84;
    };
    if bt.contains("sedan") || bt.contains("liftback") {
        0.82
    } else if bt.contains("suv") {
        0.86
    } else if bt.contains("van") || bt.contains("mpv") {
        0.88
    } else if bt.contains("coupe") || bt.contains("roadster") {
        0.80
    } else {
        0.84
    }
}

fn contains_any(haystack: Option<&str>, needles: &[&str]) -> bool {
    haystack.is_some_and(|h| {
        let h = h.to_lowercase();
        needles.iter().any(|n| h.contains(n))
    })
}

/// Rolling-resistance coefficient from power, market segment and body style.
///
/// Segment labels follow the `"X - Name"` convention (`"F - Luxury"`,
/// `"B - Small"`).
pub fn estimate_crr(power_kw: Option<f64>, segment: Option<&str>, body_type: Option<&str>) -> f64 {
    let power_above = |limit: f64| power_kw.is_some_and(|p| p > limit);

    if power_above(350.0) {
        return 0.0095;
    }
    if contains_any(segment, &["luxury", "sport", "f -", "e -"]) {
        return 0.0085;
    }
    if contains_any(body_type, &["suv", "van"]) {
        return if power_above(200.0) { 0.0085 } else { 0.0075 };
    }
    if contains_any(segment, &["a -", "b -"]) {
        return 0.0065;
    }
    0.0075
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_match_is_case_insensitive() {
        let r = find_cd("TESLA MODEL 3 Long Range", None);
        assert_eq!(r, CdLookup { cd: 0.23, source: CdSource::Published });
    }

    #[test]
    fn published_match_normalizes_punctuation() {
        let r = find_cd("Volkswagen ID3 Pro S", None);
        assert_eq!(r.source, CdSource::Published);
        assert_eq!(r.cd, 0.267);

        let r = find_cd("Ford Mustang Mach E AWD", None);
        assert_eq!(r.cd, 0.27);
        assert_eq!(r.source, CdSource::Published);
    }

    #[test]
    fn earlier_table_entries_win() {
        assert_eq!(find_cd("Mercedes EQS SUV 450+", None).cd, 0.20);
    }

    #[test]
    fn brand_and_model_tokens_match_loosely() {
        let r = find_cd("Kia EV6 GT-Line", None);
        assert_eq!(r.source, CdSource::Published);

        // "Porsche ... Taycan" with a word in between.
        let r = find_cd("Porsche 4S Taycan Cross Turismo", None);
        assert_eq!(r, CdLookup { cd: 0.22, source: CdSource::Matched });
    }

    #[test]
    fn dotted_model_names_do_not_match_loosely() {
        let r = find_cd("Volkswagen Passat GTE Hybrid", None);
        assert_eq!(r, CdLookup { cd: DEFAULT_CD, source: CdSource::Default });

        let r = find_cd("Volkswagen ID.Buzz", None);
        assert_eq!(r, CdLookup { cd: DEFAULT_CD, source: CdSource::Default });

        let r = find_cd("Volkswagen ID. Buzz Pro", Some("Van"));
        assert_eq!(r, CdLookup { cd: 0.285, source: CdSource::Published });
    }

    #[test]
    fn body_type_estimate_and_default() {
        let r = find_cd("Unknown Motors Zeta", Some("Compact SUV"));
        assert_eq!(r, CdLookup { cd: 0.29, source: CdSource::Estimated });

        let r = find_cd("Unknown Motors Zeta", Some("pickup"));
        assert_eq!(r, CdLookup { cd: DEFAULT_CD, source: CdSource::Default });

        let r = find_cd("Unknown Motors Zeta", None);
        assert_eq!(r.source, CdSource::Default);
    }

    #[test]
    fn frontal_area_shape_factors() {
        let base = 1.85 * 1.5;
        assert!((estimate_frontal_area(1850.0, 1500.0, None) - base * 0.84).abs() < 1e-12);
        assert!((estimate_frontal_area(1850.0, 1500.0, Some("Sedan")) - base * 0.82).abs() < 1e-12);
        assert!((estimate_frontal_area(1850.0, 1500.0, Some("suv")) - base * 0.86).abs() < 1e-12);
        assert!((estimate_frontal_area(1850.0, 1500.0, Some("MPV")) - base * 0.88).abs() < 1e-12);
        assert!((estimate_frontal_area(1850.0, 1500.0, Some("Roadster")) - base * 0.80).abs() < 1e-12);
        assert!((estimate_frontal_area(1850.0, 1500.0, Some("Hatchback")) - base * 0.84).abs() < 1e-12);
    }

    #[test]
    fn crr_heuristics_in_priority_order() {
        assert_eq!(estimate_crr(Some(400.0), Some("B - Small"), None), 0.0095);
        assert_eq!(estimate_crr(Some(150.0), Some("F - Luxury"), None), 0.0085);
        assert_eq!(estimate_crr(None, Some("Sports car"), None), 0.0085);
        assert_eq!(estimate_crr(Some(250.0), None, Some("SUV")), 0.0085);
        assert_eq!(estimate_crr(Some(150.0), None, Some("Van")), 0.0075);
        assert_eq!(estimate_crr(None, Some("A - Mini"), None), 0.0065);
        assert_eq!(estimate_crr(None, None, None), 0.0075);
    }
}
