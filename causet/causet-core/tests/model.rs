#![allow(unused_doc_comments)]
use causet_core::*;
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn curvature_from_integer_kappa() {
    assert_eq!(Curvature::try_from(-1), Ok(Curvature::Hyperbolic));
    assert_eq!(Curvature::try_from(0), Ok(Curvature::Flat));
    assert_eq!(Curvature::try_from(1), Ok(Curvature::Spherical));
    assert_eq!(Curvature::try_from(2), Err(CurvatureError(2)));
    assert_eq!(Curvature::Spherical.radial_factor(0.0), 1.0);
    assert!((Curvature::Hyperbolic.radial_factor(1.0) - 0.5_f64.sqrt()).abs() < 1e-15);
    assert!(Curvature::Spherical.radial_factor(1.0).is_infinite());
}

#[test]
fn events_are_keys() {
    let set: HashSet<Event> = [Event::new(0.0, 0.0), Event::new(-0.0, 0.0), Event::new(0.0, -0.0)]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 1);
    assert_ne!(Event::new(1.0, 0.5), Event::new(0.5, 1.0));
    assert_eq!(Event::new(1.0, 0.5).to_string(), "(t=1, r=0.5)");
}

#[test]
fn causal_set_keeps_insertion_order() {
    let mut set: CausalSet = [(2.0, 0.0), (1.0, 0.0), (2.0, 0.0)].into_iter().map(Event::from).collect();
    assert_eq!(set.events(), &[Event::new(2.0, 0.0), Event::new(1.0, 0.0)]);
    set.extend([Event::new(3.0, 1.0), Event::new(1.0, 0.0)]);
    assert_eq!(set.len(), 3);
    assert_eq!(set.id_of(&Event::new(3.0, 1.0)), Some(2));
    assert!(!set.contains(&Event::new(9.0, 9.0)));
    assert_eq!((&set).into_iter().count(), 3);
}

#[test]
fn region_with_varying_bounds() {
    let diamond = Region::new((0.0, 2.0), Bound::varying(|t| -(1.0 - (t - 1.0).abs())), Bound::varying(|t| 1.0 - (t - 1.0).abs()));
    assert!(diamond.as_rectangle().is_none());
    assert_eq!(diamond.space_at(1.0), (-1.0, 1.0));
    assert!(diamond.contains(&Event::new(1.0, 0.9)));
    assert!(!diamond.contains(&Event::new(0.2, 0.9)));
    assert!(!diamond.contains(&Event::new(2.5, 0.0)));

    let rect = Region::rectangle((0.0, 1.0), (-2.0, 2.0));
    assert_eq!(rect.as_rectangle(), Some(((0.0, 1.0), (-2.0, 2.0))));
    assert!(rect.contains(&Event::new(1.0, 2.0)), "bounds are closed");
    assert!(!rect.contains(&Event::new(0.5, Scalar::NAN)));
    assert!(Region::time_window((0.0, 1.0)).contains(&Event::new(0.5, 1e300)));
}

proptest! {
    /// Inserting any sequence yields exactly the distinct events, ids dense.
    #[test]
    fn ids_are_dense_and_stable(points in prop::collection::vec((-5i32..5, -5i32..5), 0..60)) {
        let mut set = CausalSet::new();
        let mut seen = HashSet::new();
        for (t, r) in points {
            let e = Event::new(t as Scalar, r as Scalar);
            let id = set.insert(e);
            if seen.insert(e) {
                prop_assert_eq!(id, seen.len() - 1);
            }
            prop_assert_eq!(set.get(id), Some(&e));
        }
        prop_assert_eq!(set.len(), seen.len());
    }
}
