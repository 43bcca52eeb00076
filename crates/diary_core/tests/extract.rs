use std::sync::Once;

use diary_core::{strip_markup, DiaryExtractor, MarkerExtractor, RawPost};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(diary_logging::initialize_for_tests);
}

fn post(content: &str) -> RawPost {
    RawPost {
        id: "1".to_string(),
        created_at: "2024-01-01T10:00:00.000Z".to_string(),
        content: content.to_string(),
        in_reply_to_id: None,
    }
}

fn extract(content: &str) -> Option<String> {
    MarkerExtractor::default().extract(&post(content))
}

#[test]
fn collapses_spaces_commas_and_exclamation_marks() {
    init_logging();
    assert_eq!(
        extract("<p>#Diary   Went, to!! the market!</p>").as_deref(),
        Some("Went to the market")
    );
}

#[test]
fn replies_are_never_entries() {
    init_logging();
    let mut reply = post("<p>#Diary a reply that looks like a diary</p>");
    reply.in_reply_to_id = Some("109".to_string());
    assert_eq!(MarkerExtractor::default().extract(&reply), None);
}

#[test]
fn non_diary_posts_are_skipped() {
    init_logging();
    assert_eq!(extract("<p>Hello world</p>"), None);
    assert_eq!(extract("<p>#diary lowercase marker</p>"), None);
    assert_eq!(extract("<p> #Diary leading space</p>"), None);
    assert_eq!(extract("<p>Today #Diary in the middle</p>"), None);
}

#[test]
fn empty_content_and_empty_bodies_are_skipped() {
    init_logging();
    assert_eq!(extract(""), None);
    assert_eq!(extract("   \n "), None);
    assert_eq!(extract("<p>#Diary</p>"), None);
    assert_eq!(extract("<p>#Diary , !! ,</p>"), None);
}

#[test]
fn markup_is_stripped_across_paragraphs_and_links() {
    init_logging();
    let html = r#"<p>#Diary fed the <a href="https://example.com/cat">cat</a></p><p>then slept</p>"#;
    assert_eq!(extract(html).as_deref(), Some("fed the catthen slept"));
}

#[test]
fn entities_decode_to_literal_text() {
    init_logging();
    assert_eq!(extract("#Diary a &amp;&amp; b").as_deref(), Some("a && b"));
}

#[test]
fn entity_decoding_runs_after_separator_collapse() {
    init_logging();
    // Markup stripping leaves "&#33;&#33;" as literal text; the collapse must not
    // see the decoded exclamation marks.
    assert_eq!(
        extract("<p>#Diary wow &amp;#33;&amp;#33;</p>").as_deref(),
        Some("wow !!")
    );
}

#[test]
fn commas_inside_words_are_collapsed_too() {
    init_logging();
    assert_eq!(extract("<p>#Diary 1,000 steps</p>").as_deref(), Some("1 000 steps"));
}

#[test]
fn custom_marker_is_honoured() {
    init_logging();
    let extractor = MarkerExtractor::new("#Log");
    assert_eq!(extractor.extract(&post("<p>#Log ran 5k</p>")).as_deref(), Some("ran 5k"));
    assert_eq!(extractor.extract(&post("<p>#Diary ran 5k</p>")), None);
}

#[test]
fn strip_markup_concatenates_text_nodes() {
    assert_eq!(strip_markup("<p>a<br>b</p><p><span>c</span></p>"), "abc");
}

#[test]
fn raw_post_deserializes_server_payload() {
    let json = r#"{
        "id": "110",
        "created_at": "2024-03-05T08:15:00.000Z",
        "content": "<p>#Diary hi</p>",
        "in_reply_to_id": null,
        "visibility": "public"
    }"#;
    let post: RawPost = serde_json::from_str(json).unwrap();
    assert_eq!(post.id, "110");
    assert!(!post.is_reply());

    let reply: RawPost =
        serde_json::from_str(r#"{"id": 111, "content": "", "in_reply_to_id": "42"}"#).unwrap();
    assert_eq!(reply.id, "111");
    assert_eq!(reply.created_at, "");
    assert!(reply.is_reply());
}

#[test]
fn non_string_timestamps_and_content_deserialize_as_empty() {
    let page = r#"[
        {"id": "2", "created_at": null, "content": "<p>#Diary no clock</p>", "in_reply_to_id": null},
        {"id": "1", "created_at": 1704103200, "content": null, "in_reply_to_id": null},
        {"id": "0", "created_at": "2024-01-01T10:00:00Z", "content": "<p>#Diary fine</p>"}
    ]"#;
    let posts: Vec<RawPost> = serde_json::from_str(page).unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].created_at, "");
    assert_eq!(posts[1].created_at, "");
    assert_eq!(posts[1].content, "");
    assert_eq!(posts[2].created_at, "2024-01-01T10:00:00Z");
}
