use super::FIXTURE_HOME;
use crate::extract::fields;
use crate::filter::LinkFilter;
use scraper::Html;
use url::Url;

fn doc() -> Html {
    Html::parse_document(FIXTURE_HOME)
}

#[test]
fn test_extract_title() {
    assert_eq!(fields::extract_title(&doc()), "Cedar Ridge Golf Club - Home");
}

#[test]
fn test_course_name_prefers_og_site_name() {
    assert_eq!(fields::extract_course_name(&doc()), "Cedar Ridge Golf Club");
}

#[test]
fn test_course_name_falls_back_to_h1() {
    let doc = Html::parse_document("<html><body><h1>Willow Creek Golf</h1></body></html>");
    assert_eq!(fields::extract_course_name(&doc), "Willow Creek Golf");
}

#[test]
fn test_headings_in_document_order() {
    let headings = fields::extract_headings(&doc());
    let texts: Vec<&str> = headings.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Cedar Ridge Golf Club", "Green Fees", "Amenities", "Hours"]
    );
    assert_eq!(headings[0].tag, "h1");
    assert_eq!(headings[1].tag, "h2");
}

#[test]
fn test_tables_extracted_with_cells() {
    let tables = fields::extract_tables(&doc());
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].len(), 3);
    assert_eq!(tables[0][1], vec!["Mon-Fri", "$45", "$28"]);
}

#[test]
fn test_empty_table_rows_dropped() {
    let doc = Html::parse_document(
        "<table><tr><td></td><td></td></tr><tr><td>a</td><td>b</td></tr></table>",
    );
    let tables = fields::extract_tables(&doc);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0], vec![vec!["a".to_string(), "b".to_string()]]);
}

#[test]
fn test_lists_pick_up_preceding_heading_context() {
    let lists = fields::extract_lists(&doc());
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].list_type, "ul");
    assert_eq!(lists[0].context, "Amenities");
    assert_eq!(lists[0].items.len(), 3);
    assert_eq!(lists[0].items[0], "Driving range with grass tees");
}

#[test]
fn test_internal_links_resolved_and_flagged() {
    let base = Url::parse("https://www.cedarridgegolf.com/").unwrap();
    let filter = LinkFilter::new(&base).unwrap();
    let links = fields::extract_internal_links(&doc(), &base, &filter, 30);

    // External ad and facebook links are excluded
    assert_eq!(links.len(), 6);
    assert!(links.iter().all(|l| l.href.contains("cedarridgegolf.com")));

    let scorecard = links.iter().find(|l| l.href.ends_with("/scorecard")).unwrap();
    assert!(scorecard.flags.is_scorecard);
    let rates = links.iter().find(|l| l.href.ends_with("/rates")).unwrap();
    assert!(rates.flags.is_rates);
    let tee = links.iter().find(|l| l.href.ends_with("/tee-times")).unwrap();
    assert!(tee.flags.is_tee_time);
}

#[test]
fn test_internal_links_cap_respected() {
    let base = Url::parse("https://www.cedarridgegolf.com/").unwrap();
    let filter = LinkFilter::new(&base).unwrap();
    let links = fields::extract_internal_links(&doc(), &base, &filter, 2);
    assert_eq!(links.len(), 2);
}

#[test]
fn test_social_links_by_platform() {
    let social = fields::extract_social_links(&doc());
    assert_eq!(social.len(), 1);
    assert_eq!(social[0].platform, "facebook");
    assert!(social[0].href.contains("facebook.com"));
}

#[test]
fn test_extractors_degrade_to_empty_on_blank_page() {
    let doc = Html::parse_document("<html><body></body></html>");
    assert!(fields::extract_headings(&doc).is_empty());
    assert!(fields::extract_tables(&doc).is_empty());
    assert!(fields::extract_lists(&doc).is_empty());
    assert!(fields::extract_social_links(&doc).is_empty());
    assert_eq!(fields::extract_title(&doc), "");
    assert_eq!(fields::extract_course_name(&doc), "");
}
