use approx::assert_relative_eq;
use flytrace::math::Point3;
use flytrace::metric::{MetricProfile, MetricScale, MetricTransform, ProfileError};

fn centerline(n: usize) -> Vec<Point3> {
    (0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect()
}

#[test]
fn rescale_round_trip_hits_the_bounds() {
    let profile = MetricProfile::build(
        centerline(3),
        &[0.0, 5.0, 10.0],
        MetricTransform::Raw,
        MetricScale::default(),
    )
    .unwrap();
    assert_relative_eq!(profile.value_at(0).unwrap(), -12.0);
    assert_relative_eq!(profile.value_at(2).unwrap(), 12.0);
    // rawMin 0, rawMax 10, input 5 lands at the interval center.
    assert_relative_eq!(profile.value_at(1).unwrap(), 0.0);
}

#[test]
fn custom_target_interval() {
    let profile = MetricProfile::build(
        centerline(3),
        &[2.0, 3.0, 4.0],
        MetricTransform::Raw,
        MetricScale { lo: 0.0, hi: 100.0 },
    )
    .unwrap();
    assert_relative_eq!(profile.value_at(0).unwrap(), 0.0);
    assert_relative_eq!(profile.value_at(1).unwrap(), 50.0);
    assert_relative_eq!(profile.value_at(2).unwrap(), 100.0);
}

#[test]
fn inverted_radii_sound_lower_when_wider() {
    // Airway radii: the widest sample should map to the lowest pitch.
    let radii = [1.0, 4.0, 10.0, 2.0];
    let profile = MetricProfile::build(
        centerline(4),
        &radii,
        MetricTransform::Inverted { pivot: 11.0 },
        MetricScale::default(),
    )
    .unwrap();
    let widest = profile.value_at(2).unwrap();
    let narrowest = profile.value_at(0).unwrap();
    assert_relative_eq!(widest, -12.0);
    assert_relative_eq!(narrowest, 12.0);
    assert!(profile.value_at(1).unwrap() < profile.value_at(3).unwrap());
}

#[test]
fn lookup_follows_a_moving_query() {
    let profile = MetricProfile::build(
        centerline(5),
        &[1.0, 2.0, 3.0, 4.0, 5.0],
        MetricTransform::Raw,
        MetricScale::default(),
    )
    .unwrap();
    // Walk a query along the centerline; values are monotone in x.
    let mut previous = f64::NEG_INFINITY;
    for i in 0..5 {
        let q = Point3::new(i as f64 + 0.1, 0.4, -0.2);
        let v = profile.value_near(&q).unwrap();
        assert!(v > previous);
        previous = v;
    }
}

#[test]
fn inversion_changes_only_the_reading_direction() {
    let raw = [3.0, 6.0, 9.0];
    let plain = MetricProfile::build(
        centerline(3),
        &raw,
        MetricTransform::Raw,
        MetricScale::default(),
    )
    .unwrap();
    let flipped = MetricProfile::build(
        centerline(3),
        &raw,
        MetricTransform::Inverted { pivot: 12.0 },
        MetricScale::default(),
    )
    .unwrap();
    for i in 0..3 {
        assert_relative_eq!(
            plain.value_at(i).unwrap(),
            -flipped.value_at(i).unwrap(),
            epsilon = 1e-12
        );
    }
}

#[test]
fn degenerate_inputs_are_construction_errors() {
    assert_eq!(
        MetricProfile::build(
            centerline(2),
            &[1.0],
            MetricTransform::Raw,
            MetricScale::default()
        )
        .unwrap_err(),
        ProfileError::LengthMismatch {
            points: 2,
            scalars: 1
        }
    );
    assert_eq!(
        MetricProfile::build(
            centerline(2),
            &[4.0, 4.0],
            MetricTransform::Raw,
            MetricScale::default()
        )
        .unwrap_err(),
        ProfileError::DegenerateRange
    );
}
