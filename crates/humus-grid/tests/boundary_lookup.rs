use humus_core::{BoxCoordinate, BoxIndex, SoilPoint};
use humus_grid::{
    BoundaryArray, BoxGrid, Dimension, Face, GridError, LookupPolicy, WrapConfig, WrapDirection,
};

fn soil_profile(policy: LookupPolicy) -> BoxGrid {
    BoxGrid::new(
        BoundaryArray::new(Dimension::X, vec![0.0, 2.5, 5.0, 7.5, 10.0]).unwrap(),
        BoundaryArray::new(Dimension::Y, vec![0.0, 5.0, 10.0]).unwrap(),
        BoundaryArray::new(Dimension::Z, vec![0.0, 1.0, 2.0, 4.0, 8.0, 16.0])
            .unwrap()
            .with_policy(policy),
        WrapConfig::XY,
    )
    .unwrap()
}

#[test]
fn depth_layers_widen_with_depth() {
    let g = soil_profile(LookupPolicy::Clamp);
    let z = g.boundary(Dimension::Z);
    let widths: Vec<f64> = (1..=z.layer_count())
        .map(|l| z.layer_width(l).unwrap())
        .collect();
    assert_eq!(widths, vec![1.0, 1.0, 2.0, 4.0, 8.0]);
    assert_eq!(z.thickness(), 16.0);
}

#[test]
fn root_tip_slightly_below_profile_clamps_to_bottom_layer() {
    let g = soil_profile(LookupPolicy::Clamp);
    let (coord, wrap) = g.find_box(&SoilPoint::new(1.0, 1.0, 16.0 + 1e-12)).unwrap();
    assert_eq!(coord, BoxCoordinate::new(1, 1, 5));
    assert!(wrap.is_none());
}

#[test]
fn strict_profile_reports_overshoot() {
    let g = soil_profile(LookupPolicy::Strict);
    let err = g.find_box(&SoilPoint::new(1.0, 1.0, 16.5)).unwrap_err();
    assert!(matches!(
        err,
        GridError::PositionOutsideDomain {
            dimension: Dimension::Z,
            ..
        }
    ));
}

#[test]
fn periodic_path_crossing_both_horizontal_edges() {
    let g = soil_profile(LookupPolicy::Clamp);
    let (coord, wrap) = g.find_box(&SoilPoint::new(-1.0, 11.0, 3.0)).unwrap();
    assert_eq!(coord, BoxCoordinate::new(4, 1, 3));
    assert_eq!(wrap, WrapDirection::X | WrapDirection::Y);
}

#[test]
fn neighbour_across_each_face_of_interior_box() {
    let g = soil_profile(LookupPolicy::Clamp);
    let centre = g.box_index(BoxCoordinate::new(2, 1, 3)).unwrap();
    let expected = [
        (Face::NegX, BoxCoordinate::new(1, 1, 3)),
        (Face::PosX, BoxCoordinate::new(3, 1, 3)),
        (Face::NegY, BoxCoordinate::new(2, 2, 3)),
        (Face::PosY, BoxCoordinate::new(2, 2, 3)),
        (Face::NegZ, BoxCoordinate::new(2, 1, 2)),
        (Face::PosZ, BoxCoordinate::new(2, 1, 4)),
    ];
    for (face, coord) in expected {
        let (nb, _) = g.neighbour(centre, face).unwrap().unwrap();
        assert_eq!(g.coordinate(nb).unwrap(), coord, "across {face}");
    }
}

#[test]
fn box_index_past_end_is_an_error() {
    let g = soil_profile(LookupPolicy::Clamp);
    let past = BoxIndex(g.box_count());
    assert!(matches!(
        g.box_volume(past),
        Err(GridError::BoxOutOfRange { .. })
    ));
}
