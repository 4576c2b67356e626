//! Integration tests for trie algebra
//!
//! Shape containment, equivalence, slice lookup and zipping across routers
//! with different output types.

use pretty_assertions::assert_eq;
use rhtmx_trie_router::*;

fn lhs_router() -> TrieRouter<(String, i32)> {
    let mut router = TrieRouter::new();
    router.register(("PoliceZoom".to_string(), 0), [">", "Police", "zoom"]);
    router.register(("Police".to_string(), 0), [">", "Police"]);
    router.register(("Depot".to_string(), 1), [">", "Depot"]);
    router.register(("Shutters".to_string(), 2), [">", "Shutters"]);
    router.register(("Cakes".to_string(), 3), [">", "Cakes"]);
    router.register(("SpacelandSignZoom".to_string(), 0), [">", "SpacelandSign", "zoom"]);
    router.register(("SpacelandSign".to_string(), 4), [">", "SpacelandSign"]);
    router
}

/// Same shape as [`lhs_router`], registered in a different order
fn rhs_router() -> TrieRouter<(String, f64)> {
    let mut router = TrieRouter::new();
    router.register(("SpacelandSignZoom".to_string(), 0.0), [">", "SpacelandSign", "zoom"]);
    router.register(("SpacelandSign".to_string(), 4.0), [">", "SpacelandSign"]);
    router.register(("Police".to_string(), 0.0), [">", "Police"]);
    router.register(("PoliceZoom".to_string(), 0.0), [">", "Police", "zoom"]);
    router.register(("Shutters".to_string(), 2.0), [">", "Shutters"]);
    router.register(("Depot".to_string(), 1.0), [">", "Depot"]);
    router.register(("Cakes".to_string(), 3.0), [">", "Cakes"]);
    router
}

// ============================================================================
// Slices
// ============================================================================

#[test]
fn test_has_slice() {
    let router = lhs_router();

    assert!(router.has_slice(">"));
    assert!(router.has_slice("Depot"));
    assert!(router.has_slice("zoom"));
    assert!(!router.has_slice("Maronna"));
    assert!(!router.has_slice_under("zoom", &[">", "Cakes"]));
    assert!(router.has_slice_under("zoom", &[">", "Police"]));
}

#[test]
fn test_has_slice_only_sees_constants() {
    let router = TrieRouter::new().with_route(1, ["users", ":id", "*"]);

    assert!(!router.has_slice(":id"));
    assert!(!router.has_slice("id"));
    assert!(!router.has_slice("*"));
}

#[test]
fn test_has_slice_case_insensitive() {
    let router = TrieRouter::with_case_insensitive(true).with_route(1, ["Users", "Me"]);
    assert!(router.has_slice("me"));
    assert!(router.has_slice_under("ME", &["USERS"]));
}

// ============================================================================
// Containment
// ============================================================================

#[test]
fn test_is_superset() {
    let lhs = lhs_router();
    assert!(lhs.is_superset(&lhs));

    let mut rhs: TrieRouter<f64> = TrieRouter::new();
    assert!(lhs.is_superset(&rhs));
    assert!(!rhs.is_superset(&lhs));

    rhs.register(1.0, [">", "Depot"]);
    rhs.register(2.0, [">", "Shutters"]);
    rhs.register(3.0, [">", "Cakes"]);
    rhs.register(0.0, [">", "SpacelandSign", "zoom"]);
    rhs.register(4.0, [">", "SpacelandSign"]);

    assert!(lhs.is_superset(&rhs));
    assert!(!rhs.is_superset(&lhs));

    rhs.register(4.0, [">", "SpacelandSign", "Rave"]);

    assert!(!lhs.is_superset(&rhs));
    assert!(!rhs.is_superset(&lhs));
}

#[test]
fn test_equivalence_ignores_registration_order() {
    assert!(lhs_router().is_equivalent(&rhs_router()));
    assert!(rhs_router().is_equivalent(&lhs_router()));
    assert!(lhs_router().root().shape_eq(&rhs_router().root()));
}

#[test]
fn test_shape_eq_on_subtrees() {
    let lhs = lhs_router();

    let police = lhs.neighbours(&[">"]).unwrap()[0];
    let spaceland = lhs.neighbours(&[">"]).unwrap()[4];
    let depot = lhs.neighbours(&[">"]).unwrap()[1];

    assert!(police.shape_eq(&spaceland));
    assert!(!police.shape_eq(&depot));
}

#[test]
fn test_case_insensitive_superset() {
    let insensitive = TrieRouter::with_case_insensitive(true).with_route(1, ["users"]);
    let sensitive = TrieRouter::new().with_route(1, ["USERS"]);

    assert!(insensitive.is_superset(&sensitive));
    assert!(!sensitive.is_superset(&insensitive));
}

// ============================================================================
// Zip
// ============================================================================

#[test]
fn test_zip_routers() {
    let mut lhs = lhs_router();
    let rhs = rhs_router();

    let zipped = lhs
        .zip(&rhs, |_, lhs_output, rhs_output| (lhs_output.clone(), rhs_output.clone()))
        .unwrap();

    let mut outputs = 0;
    zipped.for_each(|_, output| {
        if let Some((lhs_output, rhs_output)) = output {
            assert_eq!(lhs_output.0, rhs_output.0);
            outputs += 1;
        }
    });
    assert_eq!(outputs, 7);
    assert!(zipped.is_equivalent(&lhs));

    lhs.register(
        ("SpacelandSignZoomRaveZoom".to_string(), 0),
        [">", "SpacelandSign", "zoom", "rave", "zoom"],
    );

    let second = lhs.zip(&rhs, |_, lhs_output, rhs_output| (lhs_output.clone(), rhs_output.clone()));
    assert!(second.is_none());
}

#[test]
fn test_zip_passes_absolute_path() {
    let lhs = TrieRouter::new().with_route(1, ["users", ":id", "**"]);
    let rhs = TrieRouter::new().with_route("x", ["users", ":name", "**"]);

    let zipped = lhs.zip(&rhs, |path, _, _| render_path(path)).unwrap();

    let mut params = Parameters::new();
    assert_eq!(
        zipped.route(&["users", "7", "a", "b"], &mut params).map(String::as_str),
        Some("users/:id/**")
    );
    assert_eq!(params.get("id"), Some("7"));
}

#[test]
fn test_zip_keeps_configuration_and_order() {
    let lhs = TrieRouter::with_case_insensitive(true)
        .with_route(1, ["b"])
        .with_route(2, ["a"]);
    let rhs = TrieRouter::new().with_route(10, ["a"]).with_route(20, ["b"]);

    let zipped = lhs.zip(&rhs, |_, l, r| l + r).unwrap();
    assert!(zipped.config().case_insensitive);
    assert_eq!(zipped.to_string(), "→ b\n→ a");

    let mut params = Parameters::new();
    assert_eq!(zipped.route(&["B"], &mut params), Some(&21));
    assert_eq!(zipped.route(&["a"], &mut params), Some(&12));
}

#[test]
fn test_zip_across_case_settings_agrees_with_equivalence() {
    let insensitive = TrieRouter::with_case_insensitive(true).with_route(1, ["FOO", ":id"]);
    let sensitive = TrieRouter::new().with_route(2, ["foo", ":name"]);

    assert!(insensitive.is_equivalent(&sensitive));
    let zipped = insensitive.zip(&sensitive, |_, l, r| l + r).unwrap();
    assert_eq!(zipped.to_string(), "→ FOO\n  → :id");

    let mut params = Parameters::new();
    assert_eq!(zipped.route(&["foo", "x"], &mut params), Some(&3));

    assert!(sensitive.is_equivalent(&insensitive));
    assert!(sensitive.zip(&insensitive, |_, l, r| l + r).is_some());
}

#[test]
fn test_zip_some_iff_equivalent() {
    let routers = [
        TrieRouter::with_case_insensitive(true).with_route(1, ["FOO"]),
        TrieRouter::new().with_route(1, ["foo"]),
        TrieRouter::new().with_route(1, ["FOO"]),
        TrieRouter::new().with_route(1, ["foo", "*"]),
    ];

    for lhs in &routers {
        for rhs in &routers {
            assert_eq!(
                lhs.is_equivalent(rhs),
                lhs.zip(rhs, |_, l, r| l + r).is_some(),
                "lhs:\n{}\nrhs:\n{}",
                lhs,
                rhs
            );
        }
    }
}
