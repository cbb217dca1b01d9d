use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::ParsedMarker;

/// Markers recognised in a report, with the report's metadata echoed back
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLabReport {
    pub lab_name: String,
    pub test_date: String,
    pub markers: Vec<ParsedMarker>,
}

/// Known spellings of each marker, Russian and English, mapped to the
/// standard name.
const MARKER_ALIASES: &[(&str, &str)] = &[
    ("тестостерон общий", "Testosterone Total"),
    ("общий тестостерон", "Testosterone Total"),
    ("testosterone total", "Testosterone Total"),
    ("total testosterone", "Testosterone Total"),
    ("тестостерон свободный", "Testosterone Free"),
    ("свободный тестостерон", "Testosterone Free"),
    ("testosterone free", "Testosterone Free"),
    ("free testosterone", "Testosterone Free"),
    ("эстрадиол", "Estradiol"),
    ("estradiol", "Estradiol"),
    ("пролактин", "Prolactin"),
    ("prolactin", "Prolactin"),
    ("ттг", "TSH"),
    ("tsh", "TSH"),
    ("т3 свободный", "fT3"),
    ("free t3", "fT3"),
    ("ft3", "fT3"),
    ("т4 свободный", "fT4"),
    ("free t4", "fT4"),
    ("ft4", "fT4"),
    ("лг", "LH"),
    ("lh", "LH"),
    ("фсг", "FSH"),
    ("fsh", "FSH"),
    ("dhea-s", "DHEA-S"),
    ("дгэа-с", "DHEA-S"),
    ("кортизол", "Cortisol"),
    ("cortisol", "Cortisol"),
    ("актг", "ACTH"),
    ("acth", "ACTH"),
    ("инсулин", "Insulin"),
    ("insulin", "Insulin"),
    ("глюкоза", "Glucose"),
    ("glucose", "Glucose"),
    ("гликированный гемоглобин", "HbA1c"),
    ("hba1c", "HbA1c"),
    ("холестерин общий", "Cholesterol Total"),
    ("общий холестерин", "Cholesterol Total"),
    ("cholesterol total", "Cholesterol Total"),
    ("total cholesterol", "Cholesterol Total"),
    ("лпнп", "LDL"),
    ("ldl", "LDL"),
    ("лпвп", "HDL"),
    ("hdl", "HDL"),
    ("триглицериды", "Triglycerides"),
    ("triglycerides", "Triglycerides"),
    ("алт", "ALT"),
    ("alt", "ALT"),
    ("аст", "AST"),
    ("ast", "AST"),
    ("ггт", "GGT"),
    ("ggt", "GGT"),
    ("билирубин общий", "Bilirubin Total"),
    ("bilirubin total", "Bilirubin Total"),
    ("total bilirubin", "Bilirubin Total"),
    ("креатинин", "Creatinine"),
    ("creatinine", "Creatinine"),
    ("мочевина", "Urea"),
    ("urea", "Urea"),
    ("мочевая кислота", "Uric Acid"),
    ("uric acid", "Uric Acid"),
    ("ферритин", "Ferritin"),
    ("ferritin", "Ferritin"),
    ("железо", "Iron"),
    ("iron", "Iron"),
    ("витамин d", "Vitamin D"),
    ("vitamin d", "Vitamin D"),
    ("витамин b12", "Vitamin B12"),
    ("vitamin b12", "Vitamin B12"),
    ("фолиевая кислота", "Folate"),
    ("folate", "Folate"),
    ("folic acid", "Folate"),
    ("гемоглобин", "Hemoglobin"),
    ("hemoglobin", "Hemoglobin"),
    ("haemoglobin", "Hemoglobin"),
    ("гематокрит", "Hematocrit"),
    ("hematocrit", "Hematocrit"),
    ("эритроциты", "RBC"),
    ("rbc", "RBC"),
    ("лейкоциты", "WBC"),
    ("wbc", "WBC"),
    ("тромбоциты", "Platelets"),
    ("platelets", "Platelets"),
    ("соэ", "ESR"),
    ("esr", "ESR"),
    ("срб", "CRP"),
    ("c-реактивный белок", "CRP"),
    ("с-реактивный белок", "CRP"),
    ("c-reactive protein", "CRP"),
    ("crp", "CRP"),
    ("igf-1", "IGF-1"),
    ("shbg", "SHBG"),
    ("гспг", "SHBG"),
    ("лептин", "Leptin"),
    ("leptin", "Leptin"),
    ("гомоцистеин", "Homocysteine"),
    ("homocysteine", "Homocysteine"),
    ("psa", "PSA"),
    ("пса", "PSA"),
];

/// Values outside these bounds are almost certainly misreads
const PLAUSIBLE_RANGES: &[(&str, f64, f64)] = &[
    ("Testosterone Total", 0.0, 5000.0),
    ("TSH", 0.0, 100.0),
    ("Glucose", 0.0, 50.0),
    ("HbA1c", 0.0, 20.0),
    ("Vitamin D", 0.0, 500.0),
];

/// One word-bounded matcher per alias
static ALIAS_MATCHERS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    MARKER_ALIASES
        .iter()
        .filter_map(|(alias, name)| {
            let pattern = format!(
                r"(?i)(?:^|[^\p{{L}}\p{{N}}])({})(?:[^\p{{L}}\p{{N}}]|$)",
                regex::escape(alias)
            );
            Regex::new(&pattern).ok().map(|re| (re, *name))
        })
        .collect()
});

static VALUE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)(?:\s*([\p{L}µ%][\p{L}\p{N}µ%/^*]*))?").expect("valid regex")
});

static RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*[-–—]\s*(\d+(?:[.,]\d+)?)").expect("valid regex")
});

/// Category of a standard marker name; unknown markers are `other`
pub fn category_for(marker_name: &str) -> &'static str {
    match marker_name {
        "Testosterone Total" | "Testosterone Free" | "Estradiol" | "Prolactin" | "LH" | "FSH"
        | "DHEA-S" | "Cortisol" | "ACTH" | "IGF-1" | "SHBG" | "Leptin" => "hormones",
        "TSH" | "fT3" | "fT4" => "thyroid",
        "Insulin" | "Glucose" | "HbA1c" => "metabolism",
        "Cholesterol Total" | "LDL" | "HDL" | "Triglycerides" => "lipids",
        "ALT" | "AST" | "GGT" | "Bilirubin Total" => "liver",
        "Creatinine" | "Urea" | "Uric Acid" => "kidney",
        "Ferritin" | "Iron" => "iron",
        "Vitamin D" | "Vitamin B12" | "Folate" => "vitamins",
        "Hemoglobin" | "Hematocrit" | "RBC" | "WBC" | "Platelets" => "blood",
        "ESR" | "CRP" => "inflammation",
        "Homocysteine" => "cardiovascular",
        "PSA" => "prostate",
        _ => "other",
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse().ok()
}

/// Every known marker mention on a line as `(start, end, name)` byte spans,
/// in reading order. Overlapping mentions keep the earliest, then the longest,
/// so "гликированный гемоглобин" is not also read as "гемоглобин".
fn find_markers(line: &str) -> Vec<(usize, usize, &'static str)> {
    let mut found = Vec::new();
    for (re, name) in ALIAS_MATCHERS.iter() {
        let mut pos = 0;
        while let Some(alias) = re.captures_at(line, pos).and_then(|caps| caps.get(1)) {
            found.push((alias.start(), alias.end(), *name));
            pos = alias.end();
        }
    }
    found.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut kept = Vec::with_capacity(found.len());
    let mut last_end = 0;
    for (start, end, name) in found {
        if start >= last_end {
            kept.push((start, end, name));
            last_end = end;
        }
    }
    kept
}

/// Value, unit and reference range following a marker name
fn parse_segment(name: &str, segment: &str) -> Option<ParsedMarker> {
    let caps = VALUE_PATTERN.captures(segment)?;
    let value = caps.get(1).and_then(|m| parse_number(m.as_str()))?;
    let unit = caps.get(2).map(|m| m.as_str().to_string());

    let after_value = caps.get(0).map_or(segment.len(), |m| m.end());
    let (reference_min, reference_max) = RANGE_PATTERN
        .captures(&segment[after_value..])
        .map(|range| {
            (
                range.get(1).and_then(|m| parse_number(m.as_str())),
                range.get(2).and_then(|m| parse_number(m.as_str())),
            )
        })
        .unwrap_or((None, None));

    Some(ParsedMarker {
        marker_name: Some(name.to_string()),
        value: Some(value),
        unit,
        reference_min,
        reference_max,
        category: Some(category_for(name).to_string()),
    })
}

/// A line may carry several markers (PDF text objects are joined into one
/// line); each marker reads up to the next marker's name.
fn parse_line(line: &str) -> Vec<ParsedMarker> {
    let mentions = find_markers(line);
    mentions
        .iter()
        .enumerate()
        .filter_map(|(i, &(_, end, name))| {
            let next_start = mentions.get(i + 1).map_or(line.len(), |next| next.0);
            parse_segment(name, &line[end..next_start])
        })
        .collect()
}

/// Rule-based marker extraction
pub fn parse_lab_text(text: &str, lab_name: &str, test_date: &str) -> ParsedLabReport {
    let markers = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(parse_line)
        .collect();

    ParsedLabReport {
        lab_name: lab_name.to_string(),
        test_date: test_date.to_string(),
        markers,
    }
}

/// Plausibility warnings for values that are probably misread
pub fn validate_markers(markers: &[ParsedMarker]) -> Vec<String> {
    markers
        .iter()
        .filter_map(|marker| {
            let name = marker.marker_name.as_deref()?;
            let value = marker.value?;
            let (_, min, max) = PLAUSIBLE_RANGES.iter().find(|(n, _, _)| *n == name)?;
            (value < *min || value > *max)
                .then(|| format!("{}: value {:.2} seems out of range", name, value))
        })
        .collect()
}
