// src/extractors/profile.rs

// --- Imports ---
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::fragment::{find_by_style, paired_element, paired_text, selector, text_of, Side};
use super::text::{career_years, clean_text, measurement_units};
use super::DocumentExtractor;
use crate::records::{BoxerProfile, BoxerProfileBuilder};
use crate::utils::error::ExtractError;

// --- Constants ---
const NAME_STYLE: &str = "display:inline-block;margin-right:10px;line-height:30px;";
const ID_STYLE: &str = "display:inline-block;line-height:100%;padding:0;margin:0;";
const DEBUT_DATE_FORMAT: &str = "%Y-%m-%d";
const TITLES_HELD_LABEL: &str = "titles held";

/// Row labels read from the profile table, in lookup order.
const ROW_LABELS: [&str; 15] = [
    "division",
    "bouts",
    "rounds",
    "KOs",
    "career",
    "debut",
    "birth name",
    "alias",
    "age",
    "nationality",
    "stance",
    "height",
    "reach",
    "residence",
    "birth place",
];

// --- CSS Selectors (Lazy Static) ---
static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("h1"));
static H2_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("h2"));
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("a"));
static WINS_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("td.bgW"));
static LOSSES_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("td.bgL"));
static DRAWS_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("td.bgD"));
static WLD_TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("table.profileWLD"));
static KO_WINS_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("th.textWon"));
static KO_LOSSES_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("th.textLost"));
static ROW_LABEL_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("td.rowLabel"));

/// Canonical field name for a profile-table row label.
///
/// Labels without a mapping come back unchanged.
pub fn relabel(label: &str) -> &str {
    match label {
        "division" => "weightclass",
        "bouts" => "boxer_bouts_tot",
        "rounds" => "boxer_rounds_tot",
        "KOs" => "boxer_kos_pct",
        "career" => "boxer_career_span",
        "debut" => "boxer_debut_date",
        "birth name" => "boxer_birth_name",
        "alias" => "boxer_alias_name",
        "age" => "boxer_age",
        "nationality" => "boxer_nation",
        "stance" => "boxer_stance",
        "height" => "boxer_height",
        "reach" => "boxer_reach",
        "residence" => "boxer_residence",
        "birth place" => "boxer_birthplace",
        other => other,
    }
}

/// Boxer name from the page heading; shared by profile and career pages.
pub(crate) fn page_boxer_name(document: &Html) -> Option<String> {
    find_by_style(document.root_element(), &H1_SELECTOR, NAME_STYLE)
        .map(text_of)
        .filter(|name| !name.is_empty())
}

/// Boxer id from the `"ID# 629465"` sub-heading.
pub(crate) fn page_boxer_id(document: &Html) -> Option<u64> {
    let heading = find_by_style(document.root_element(), &H2_SELECTOR, ID_STYLE)?;
    let text = text_of(heading);
    text.split('#').nth(1)?.trim().parse().ok()
}

// --- Field extractors ---

/// A total is only trusted when exactly one cell carries it.
fn single_count(document: &Html, cells: &Selector) -> Option<u32> {
    let found: Vec<ElementRef> = document.select(cells).collect();
    match found.as_slice() {
        [cell] => text_of(*cell).parse().ok(),
        _ => None,
    }
}

fn add_record_totals(document: &Html, builder: &mut BoxerProfileBuilder) {
    if let Some(n) = single_count(document, &WINS_SELECTOR) {
        builder.boxer_win_tot(n);
    }
    if let Some(n) = single_count(document, &LOSSES_SELECTOR) {
        builder.boxer_loss_tot(n);
    }
    if let Some(n) = single_count(document, &DRAWS_SELECTOR) {
        builder.boxer_draw_tot(n);
    }
}

/// `"22 KOs"` header cell.
fn ko_count(table: ElementRef, header: &Selector) -> Option<u32> {
    let cell = table.select(header).next()?;
    clean_text(text_of(cell).split('K').next()?).parse().ok()
}

fn add_ko_totals(wld_table: ElementRef, builder: &mut BoxerProfileBuilder) {
    if let Some(n) = ko_count(wld_table, &KO_WINS_SELECTOR) {
        builder.boxer_ko_win_tot(n);
    }
    if let Some(n) = ko_count(wld_table, &KO_LOSSES_SELECTOR) {
        builder.boxer_ko_loss_tot(n);
    }
}

/// Value text for each row label found, keyed by its raw label.
///
/// Labels match by substring; when several rows match, the last one wins.
fn row_attributes(row_labels: &[ElementRef]) -> Vec<(&'static str, String)> {
    let mut attributes = Vec::new();
    for label in ROW_LABELS {
        let value = row_labels
            .iter()
            .filter(|cell| text_of(**cell).contains(label))
            .filter_map(|cell| paired_text(*cell, Side::Right))
            .last();
        if let Some(value) = value {
            attributes.push((label, value));
        }
    }
    attributes
}

fn coerce<T: FromStr>(key: &str, value: &str) -> Option<T> {
    let parsed = value.parse().ok();
    if parsed.is_none() {
        tracing::debug!("Could not coerce {}='{}'", key, value);
    }
    parsed
}

/// Writes one relabeled attribute with its field's type.
fn add_attribute(key: &str, value: String, builder: &mut BoxerProfileBuilder) {
    match key {
        "weightclass" => {
            builder.weightclass(value);
        }
        "boxer_bouts_tot" => {
            if let Some(n) = coerce::<u32>(key, &value) {
                builder.boxer_bouts_tot(n);
            }
        }
        "boxer_rounds_tot" => {
            if let Some(n) = coerce::<u32>(key, &value) {
                builder.boxer_rounds_tot(n);
            }
        }
        "boxer_kos_pct" => {
            if let Some(pct) = coerce::<f64>(key, value.replace('%', "").trim()) {
                builder.boxer_kos_pct(pct);
            }
        }
        "boxer_career_span" => {
            builder.boxer_career_span(value);
        }
        "boxer_debut_date" => match NaiveDate::parse_from_str(&value, DEBUT_DATE_FORMAT) {
            Ok(date) => {
                builder.boxer_debut_date(date);
            }
            Err(e) => tracing::debug!("Unparseable debut date '{}': {}", value, e),
        },
        "boxer_birth_name" => {
            builder.boxer_birth_name(value);
        }
        "boxer_alias_name" => {
            builder.boxer_alias_name(value);
        }
        "boxer_age" => {
            if let Some(n) = coerce::<u32>(key, &value) {
                builder.boxer_age(n);
            }
        }
        "boxer_nation" => {
            builder.boxer_nation(value);
        }
        "boxer_stance" => {
            builder.boxer_stance(value);
        }
        "boxer_height" => {
            builder.boxer_height(value);
        }
        "boxer_reach" => {
            builder.boxer_reach(value);
        }
        "boxer_residence" => {
            builder.boxer_residence(value);
        }
        "boxer_birthplace" => {
            builder.boxer_birthplace(value);
        }
        other => tracing::debug!("No profile field for label '{}'", other),
    }
}

fn add_titles_held(row_labels: &[ElementRef], builder: &mut BoxerProfileBuilder) {
    for cell in row_labels {
        if !text_of(*cell).contains(TITLES_HELD_LABEL) {
            continue;
        }
        let titles: Vec<String> = paired_element(*cell, Side::Right)
            .map(|value| value.select(&ANCHOR_SELECTOR).map(text_of).collect())
            .unwrap_or_default();
        if !titles.is_empty() {
            builder.boxer_titles_held(titles);
        }
    }
}

fn add_wins_pct(builder: &mut BoxerProfileBuilder) {
    let (wins, bouts) = {
        let profile = builder.peek();
        (profile.boxer_win_tot, profile.boxer_bouts_tot)
    };
    if bouts > 0 {
        builder.boxer_wins_pct(f64::from(wins) / f64::from(bouts));
    }
}

fn add_career_years(builder: &mut BoxerProfileBuilder) {
    let years = career_years(&builder.peek().boxer_career_span);
    if let Some((start, end)) = years {
        builder.career_start_year(start).career_end_year(end);
    }
}

fn add_measurements(builder: &mut BoxerProfileBuilder) {
    let (height_ft, height_cm) = measurement_units(&builder.peek().boxer_height);
    let (reach_ft, reach_cm) = measurement_units(&builder.peek().boxer_reach);
    builder
        .boxer_height_ft(height_ft)
        .boxer_height_cm(height_cm)
        .boxer_reach_ft(reach_ft)
        .boxer_reach_cm(reach_cm);
}

// --- Document extractor ---

/// Extracts a [`BoxerProfile`] from a boxer's profile page.
#[derive(Debug, Default, Clone)]
pub struct ProfileExtractor;

impl ProfileExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts one profile page.
    ///
    /// Order: name and id, win/loss/draw totals, KO totals, row-label
    /// attributes (relabeled, then coerced), titles held, and finally the
    /// fields derived from those: win percentage, career years, height and
    /// reach conversions.
    pub fn extract_profile(&self, boxer_key: &str, html: &str) -> Result<BoxerProfile, ExtractError> {
        let document = Html::parse_document(html);

        let name = page_boxer_name(&document).ok_or_else(|| {
            ExtractError::MissingAnchor(format!("boxer name heading on profile {}", boxer_key))
        })?;

        let wld_table = document.select(&WLD_TABLE_SELECTOR).next();
        let row_labels: Vec<ElementRef> = document.select(&ROW_LABEL_SELECTOR).collect();
        tracing::trace!(
            "Located fragments for profile {}: {} row labels, wld table={}",
            boxer_key,
            row_labels.len(),
            wld_table.is_some()
        );

        let mut builder = BoxerProfileBuilder::new();
        builder.boxer_name(name);
        if let Some(id) = page_boxer_id(&document) {
            builder.br_boxer_id(id);
        }

        add_record_totals(&document, &mut builder);
        if let Some(table) = wld_table {
            add_ko_totals(table, &mut builder);
        }
        for (label, value) in row_attributes(&row_labels) {
            add_attribute(relabel(label), value, &mut builder);
        }
        add_titles_held(&row_labels, &mut builder);

        add_wins_pct(&mut builder);
        add_career_years(&mut builder);
        add_measurements(&mut builder);

        Ok(builder.build())
    }
}

impl DocumentExtractor for ProfileExtractor {
    type Output = BoxerProfile;

    fn kind(&self) -> &'static str {
        "profile"
    }

    fn extract(&self, key: &str, html: &str) -> Result<BoxerProfile, ExtractError> {
        self.extract_profile(key, html)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn profile_page(rows: &str) -> String {
        format!(
            r#"<html><head><title>BoxRec: Tyson Fury</title></head><body>
<h1 style="display:inline-block;margin-right:10px;line-height:30px;">Tyson Fury</h1>
<h2 style="display:inline-block;line-height:100%;padding:0;margin:0;">ID# 629465</h2>
<table class="profileWLD">
  <tr>
    <td class="bgW">31</td>
    <td class="bgL">0</td>
    <td class="bgD">1</td>
  </tr>
  <tr>
    <th class="textWon">22 KOs</th>
    <th class="textLost">0 KOs</th>
  </tr>
</table>
<table class="rowTable">{rows}
</table>
</body></html>"#
        )
    }

    const FULL_ROWS: &str = r#"
  <tr>
    <td class="rowLabel"><b>division</b></td>
    <td>heavy</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>bouts</b></td>
    <td>32</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>rounds</b></td>
    <td>188</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>KOs</b></td>
    <td>68.75%</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>career</b></td>
    <td>2008-2022</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>debut</b></td>
    <td>2008-12-06</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>titles held</b></td>
    <td><a href="/en/title/6">WBC World Heavyweight Title</a> <a href="/en/title/113">The Ring Heavyweight Title</a></td>
  </tr>
  <tr>
    <td class="rowLabel"><b>birth name</b></td>
    <td>Tyson Luke Fury</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>alias</b></td>
    <td>Gypsy King</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>age</b></td>
    <td>34</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>nationality</b></td>
    <td>United Kingdom</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>stance</b></td>
    <td>orthodox</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>height</b></td>
    <td>6′ 9″ / 206cm</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>reach</b></td>
    <td>85″ / 216cm</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>residence</b></td>
    <td>Morecambe, Lancashire, United Kingdom</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>birth place</b></td>
    <td>Wythenshawe, Manchester, United Kingdom</td>
  </tr>"#;

    fn extract(html: &str) -> Result<BoxerProfile, ExtractError> {
        ProfileExtractor::new().extract_profile("629465", html)
    }

    #[test]
    fn relabel_maps_known_labels_and_passes_others_through() {
        assert_eq!(relabel("division"), "weightclass");
        assert_eq!(relabel("debut"), "boxer_debut_date");
        assert_eq!(relabel("birth name"), "boxer_birth_name");
        assert_eq!(relabel("birth place"), "boxer_birthplace");
        assert_eq!(relabel("manager"), "manager");
        assert_eq!(relabel(""), "");
    }

    #[test]
    fn identity_and_totals() {
        let profile = extract(&profile_page(FULL_ROWS)).unwrap();

        assert_eq!(profile.boxer_name, "Tyson Fury");
        assert_eq!(profile.br_boxer_id, 629465);
        assert_eq!(
            (profile.boxer_win_tot, profile.boxer_loss_tot, profile.boxer_draw_tot),
            (31, 0, 1)
        );
        assert_eq!((profile.boxer_ko_win_tot, profile.boxer_ko_loss_tot), (22, 0));
    }

    #[test]
    fn row_attributes_are_relabeled_and_typed() {
        let profile = extract(&profile_page(FULL_ROWS)).unwrap();

        assert_eq!(profile.weightclass, "heavy");
        assert_eq!(profile.boxer_bouts_tot, 32);
        assert_eq!(profile.boxer_rounds_tot, 188);
        assert_eq!(profile.boxer_kos_pct, 68.75);
        assert_eq!(profile.boxer_debut_date, NaiveDate::from_ymd_opt(2008, 12, 6));
        assert_eq!(profile.boxer_birth_name, "Tyson Luke Fury");
        assert_eq!(profile.boxer_alias_name, "Gypsy King");
        assert_eq!(profile.boxer_age, 34);
        assert_eq!(profile.boxer_nation, "United Kingdom");
        assert_eq!(profile.boxer_stance, "orthodox");
        assert_eq!(profile.boxer_residence, "Morecambe, Lancashire, United Kingdom");
        assert_eq!(profile.boxer_birthplace, "Wythenshawe, Manchester, United Kingdom");
        assert_eq!(
            profile.boxer_titles_held,
            vec!["WBC World Heavyweight Title", "The Ring Heavyweight Title"]
        );
    }

    #[test]
    fn derived_fields() {
        let profile = extract(&profile_page(FULL_ROWS)).unwrap();

        assert_eq!(profile.boxer_wins_pct, 31.0 / 32.0);
        assert_eq!((profile.career_start_year, profile.career_end_year), (2008, 2022));
        assert_eq!(profile.boxer_height, "6′ 9′′ / 206cm");
        assert_eq!(profile.boxer_height_ft, Some(6.75));
        assert_eq!(profile.boxer_height_cm, Some(206));
        assert_eq!(profile.boxer_reach_ft, Some(7.08));
        assert_eq!(profile.boxer_reach_cm, Some(216));
    }

    #[test]
    fn zero_bouts_and_bad_values_keep_defaults() {
        let rows = r#"
  <tr>
    <td class="rowLabel"><b>bouts</b></td>
    <td>0</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>career</b></td>
    <td>2019</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>debut</b></td>
    <td>soon</td>
  </tr>
  <tr>
    <td class="rowLabel"><b>height</b></td>
    <td>tall</td>
  </tr>"#;
        let profile = extract(&profile_page(rows)).unwrap();

        assert_eq!(profile.boxer_bouts_tot, 0);
        assert_eq!(profile.boxer_wins_pct, 0.0);
        assert_eq!(profile.boxer_career_span, "2019");
        assert_eq!((profile.career_start_year, profile.career_end_year), (0, 0));
        assert_eq!(profile.boxer_debut_date, None);
        assert_eq!(profile.boxer_height, "tall");
        assert_eq!(profile.boxer_height_ft, None);
        assert_eq!(profile.boxer_height_cm, None);
        assert!(profile.boxer_titles_held.is_empty());
    }

    #[test]
    fn missing_name_heading_fails_the_document() {
        let html = profile_page(FULL_ROWS).replace("margin-right:10px;", "");
        let err = extract(&html).unwrap_err();
        assert!(matches!(err, ExtractError::MissingAnchor(_)));
    }

    #[test]
    fn missing_id_heading_is_soft() {
        let html = profile_page("").replace("ID# 629465", "ID#");
        let profile = extract(&html).unwrap();
        assert_eq!(profile.br_boxer_id, 0);
        assert_eq!(profile.boxer_name, "Tyson Fury");
    }
}
