mod common;

use common::{complete_at, create_workspace, labels};

// ─── Field chain completion ─────────────────────────────────────────────────

const GEO_MODULE: &str = concat!(
    "def geo::Point() {\n",
    "    return ptd::rec({\n",
    "        x => ptd::sim(),\n",
    "        y => ptd::sim(),\n",
    "    });\n",
    "}\n",
    "\n",
    "def geo::Route() {\n",
    "    return ptd::rec({\n",
    "        from => @geo::Point,\n",
    "        to => @geo::Point,\n",
    "        stops => ptd::arr(@geo::Point),\n",
    "        tags => ptd::hash(ptd::rec({label => ptd::sim(), weight => ptd::sim()})),\n",
    "        name => ptd::sim(),\n",
    "    });\n",
    "}\n",
);

#[tokio::test]
async fn test_bare_scalar_record_fields() {
    let m = "def m::Point() {\n    return ptd::rec({x=>ptd::sim, y=>ptd::sim});\n}\n";
    let (backend, dir) = create_workspace(&[("m.nl", m)]);

    let text = concat!(
        "def app::main() {\n",
        "    var x : @m::Point = m::origin();\n",
        "    x->\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "app.nl", text, 2, 7).await;

    assert_eq!(
        items,
        vec![
            ("x".to_string(), Some("ptd::sim".to_string())),
            ("y".to_string(), Some("ptd::sim".to_string())),
        ]
    );
}

#[tokio::test]
async fn test_parameter_type_fields() {
    let (backend, dir) = create_workspace(&[("src/geo.nl", GEO_MODULE)]);

    let text = concat!(
        "def app::len(route : @geo::Route) {\n",
        "    return route->\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "app.nl", text, 1, 18).await;

    assert_eq!(labels(&items), vec!["from", "to", "stops", "tags", "name"]);
    let details: Vec<Option<&str>> = items.iter().map(|(_, d)| d.as_deref()).collect();
    assert_eq!(
        details,
        vec![
            Some("@geo::Point"),
            Some("@geo::Point"),
            Some("ptd::arr"),
            Some("ptd::hash"),
            Some("ptd::sim"),
        ]
    );
}

#[tokio::test]
async fn test_chain_through_named_reference() {
    let (backend, dir) = create_workspace(&[("geo.nl", GEO_MODULE)]);

    let text = concat!(
        "def app::len(route : @geo::Route) {\n",
        "    return route->from->\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "app.nl", text, 1, 24).await;

    assert_eq!(labels(&items), vec!["x", "y"]);
}

#[tokio::test]
async fn test_chain_through_array_with_subscript() {
    let (backend, dir) = create_workspace(&[("geo.nl", GEO_MODULE)]);

    let text = concat!(
        "def app::len(route : @geo::Route) {\n",
        "    return route->stops[0]->\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "app.nl", text, 1, 28).await;

    assert_eq!(labels(&items), vec!["x", "y"]);
}

#[tokio::test]
async fn test_chain_through_hash_with_subscript() {
    let (backend, dir) = create_workspace(&[("geo.nl", GEO_MODULE)]);

    let text = concat!(
        "def app::len(route : @geo::Route) {\n",
        "    return route->tags{'home'}->we\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "app.nl", text, 1, 34).await;

    assert_eq!(labels(&items), vec!["label", "weight"]);
}

#[tokio::test]
async fn test_scalar_field_has_no_completions() {
    let (backend, dir) = create_workspace(&[("geo.nl", GEO_MODULE)]);

    let text = concat!(
        "def app::len(route : @geo::Route) {\n",
        "    return route->name->\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "app.nl", text, 1, 24).await;

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_undeclared_variable_has_no_completions() {
    let (backend, dir) = create_workspace(&[("geo.nl", GEO_MODULE)]);

    let text = concat!(
        "def app::first(route : @geo::Route) {\n",
        "}\n",
        "def app::second() {\n",
        "    route->\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "app.nl", text, 3, 11).await;

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_missing_type_module_has_no_completions() {
    let (backend, dir) = create_workspace(&[("geo.nl", GEO_MODULE)]);

    let text = concat!(
        "def app::len(p : @shapes::Circle) {\n",
        "    p->\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "app.nl", text, 1, 7).await;

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_arrow_inside_call_argument() {
    let (backend, dir) = create_workspace(&[("geo.nl", GEO_MODULE)]);

    let text = concat!(
        "def app::len(route : @geo::Route) {\n",
        "    geo::dist(route->to->\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "app.nl", text, 1, 25).await;

    assert_eq!(labels(&items), vec!["x", "y"]);
}

#[tokio::test]
async fn test_caret_column_counts_utf16_units() {
    let (backend, dir) = create_workspace(&[("geo.nl", GEO_MODULE)]);

    let ascii = concat!(
        "def app::show(p : @geo::Point) {\n",
        "    s('a', p-> );\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "ascii.nl", ascii, 1, 14).await;
    assert_eq!(labels(&items), vec!["x", "y"]);

    // `😀` takes two UTF-16 units, so the same caret sits one column later.
    let emoji = concat!(
        "def app::show(p : @geo::Point) {\n",
        "    s('😀', p-> );\n",
        "}\n",
    );
    let items = complete_at(&backend, &dir, "emoji.nl", emoji, 1, 15).await;
    assert_eq!(labels(&items), vec!["x", "y"]);
}

#[tokio::test]
async fn test_concurrent_requests_resolve_independently() {
    let (backend, dir) = create_workspace(&[("geo.nl", GEO_MODULE)]);

    let points = "def app::a(p : @geo::Point) {\n    p->\n}\n";
    let routes = "def app::b(r : @geo::Route) {\n    r->\n}\n";
    let (first, second) = tokio::join!(
        complete_at(&backend, &dir, "a.nl", points, 1, 7),
        complete_at(&backend, &dir, "b.nl", routes, 1, 7),
    );

    assert_eq!(labels(&first), vec!["x", "y"]);
    assert_eq!(labels(&second), vec!["from", "to", "stops", "tags", "name"]);
}
