//! Behavioural properties of the projector and the resampling engine.

use approx::assert_relative_eq;
use ndimg_core::{
    Argb, ArrayImg, Identity, Interval, Position, RandomAccessible, RealPosition,
    RealRandomAccessible,
};
use ndimg_ops::{
    affine, affine_argb, affine_real, AnyImg, Boundary, Mode, OutOfBoundsFactory, ProjectionPath,
    Projector2D, ResampleConfig,
};

fn volume(dims: &[u64]) -> ArrayImg<i64> {
    ArrayImg::from_fn(Interval::from_dims(dims).unwrap(), |p| {
        p.iter().enumerate().map(|(d, c)| c * 100i64.pow(d as u32)).sum::<i64>()
    })
    .unwrap()
}

fn strategies() -> Vec<OutOfBoundsFactory<i64>> {
    vec![
        OutOfBoundsFactory::ConstantValue(-7),
        OutOfBoundsFactory::Border,
        OutOfBoundsFactory::Periodic,
        OutOfBoundsFactory::Mirror(Boundary::Single),
        OutOfBoundsFactory::Mirror(Boundary::Double),
    ]
}

#[test]
fn projector_paths_are_equivalent() {
    let vol = volume(&[5, 4, 3]);
    let axes = [(0, 1), (1, 0), (0, 2), (2, 0), (1, 2), (2, 1)];
    let targets = [
        Interval::from_dims(&[5, 4]).unwrap(),
        Interval::from_dims(&[2, 3]).unwrap(),
        Interval::from_min_size(Position::new([1, 1]), &[3, 2]).unwrap(),
    ];
    for (dim_x, dim_y) in axes {
        for target in &targets {
            for fixed in 0..3i64 {
                let mut fast = ArrayImg::with_interval(target.clone(), 0i64).unwrap();
                let mut slow = ArrayImg::with_interval(target.clone(), 0i64).unwrap();
                let ext = OutOfBoundsFactory::Border.extend(&vol);

                let mut a = Projector2D::new(dim_x, dim_y, &ext, &mut fast, Identity).unwrap();
                let mut b = Projector2D::new(dim_x, dim_y, &ext, &mut slow, Identity).unwrap();
                let free = 3 - dim_x - dim_y;
                a.set_position(free, fixed);
                b.set_position(free, fixed);
                a.map().unwrap();
                b.map_random_access();
                assert_eq!(fast, slow, "axes ({dim_x}, {dim_y}) target {target} fixed {fixed}");
            }
        }
    }
}

#[test]
fn projector_paths_agree_outside_the_source() {
    let vol = volume(&[3, 3, 3]);
    for oob in strategies() {
        let ext = oob.extend(&vol);
        let target = Interval::from_min_size(Position::new([-2, -1]), &[7, 6]).unwrap();
        let mut fast = ArrayImg::with_interval(target.clone(), 0i64).unwrap();
        let mut slow = ArrayImg::with_interval(target, 0i64).unwrap();

        let mut a = Projector2D::new(0, 2, &ext, &mut fast, Identity).unwrap();
        a.set_position(1, 4);
        assert_eq!(a.map().unwrap(), ProjectionPath::RandomAccess);
        let mut b = Projector2D::new(0, 2, &ext, &mut slow, Identity).unwrap();
        b.set_position(1, 4);
        b.map_random_access();
        assert_eq!(fast, slow);
    }
}

#[test]
fn projector_visits_every_target_position_once() {
    let vol = volume(&[6, 6, 2]);
    let count = |_: &i64, n: &mut u32| *n += 1;
    for (dim_x, dim_y) in [(0, 1), (1, 0), (0, 2)] {
        let mut target = ArrayImg::new(&[2, 2], 0u32).unwrap();
        Projector2D::new(dim_x, dim_y, &vol, &mut target, count).unwrap().map().unwrap();
        assert!(target.data().iter().all(|&n| n == 1), "axes ({dim_x}, {dim_y})");

        let mut target = ArrayImg::new(&[2, 2], 0u32).unwrap();
        Projector2D::new(dim_x, dim_y, &vol, &mut target, count)
            .unwrap()
            .map_random_access();
        assert!(target.data().iter().all(|&n| n == 1));
    }
}

#[test]
fn projector_reads_fixed_axis_at_reference() {
    let vol = volume(&[4, 8, 4]);
    let mut target = ArrayImg::new(&[4, 4], 0i64).unwrap();
    let mut proj = Projector2D::new(0, 2, &vol, &mut target, Identity).unwrap();
    proj.set_position(1, 5);
    proj.map().unwrap();

    assert_eq!(target.len(), 16);
    for p in target.positions() {
        let expected = vol.sample(&Position::new([p[0], 5, p[1]]));
        assert_eq!(target.sample(&p), expected);
    }
}

#[test]
fn identity_resampling_round_trips() {
    let identity_2d = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let identity_3d = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0];

    let floats = ArrayImg::from_fn(Interval::from_dims(&[7, 5]).unwrap(), |p| {
        (p[0] as f32).sin() + p[1] as f32
    })
    .unwrap();
    let words = ArrayImg::from_fn(Interval::from_dims(&[3, 4, 5]).unwrap(), |p| {
        (p[0] * 1000 + p[1] * 100 + p[2]) as u16
    })
    .unwrap();
    let colours = ArrayImg::from_fn(Interval::from_dims(&[4, 4]).unwrap(), |p| {
        Argb::from_channels(255, (p[0] * 60) as u8, (p[1] * 60) as u8, 7)
    })
    .unwrap();

    for mode in [Mode::Linear, Mode::NearestNeighbor] {
        let oob = OutOfBoundsFactory::zero();
        assert_eq!(affine_real(&floats, &identity_2d, mode, &oob).unwrap(), floats);
        assert_eq!(affine_real(&words, &identity_3d, mode, &OutOfBoundsFactory::zero()).unwrap(), words);
        assert_eq!(
            affine_argb(&colours, &identity_2d, mode, &OutOfBoundsFactory::zero()).unwrap(),
            colours
        );
    }
}

#[test]
fn interpolators_are_exact_at_grid_points() {
    let img = ArrayImg::from_fn(Interval::from_dims(&[4, 3]).unwrap(), |p| {
        (p[0] * 7 - p[1] * 3) as f64 * 0.1
    })
    .unwrap();
    for oob in [
        OutOfBoundsFactory::ConstantValue(9.0),
        OutOfBoundsFactory::Periodic,
        OutOfBoundsFactory::Mirror(Boundary::Double),
    ] {
        let ext = oob.extend(&img);
        let nn = Mode::NearestNeighbor.interpolate(&ext);
        let lin = Mode::Linear.interpolate(&ext);
        for x in -3..7 {
            for y in -3..6 {
                let p = Position::new([x, y]);
                let stored = ext.sample(&p);
                assert_eq!(nn.sample_at(&p.to_real()), stored);
                assert_eq!(lin.sample_at(&p.to_real()), stored);
            }
        }
    }
}

#[test]
fn constant_extension_holds_everywhere_outside() {
    let img = ArrayImg::with_interval(
        Interval::new(Position::new([-2, 3, 0]), Position::new([1, 5, 0])).unwrap(),
        1.5f32,
    )
    .unwrap();
    let ext = OutOfBoundsFactory::ConstantValue(-4.25f32).extend(&img);
    let far = [i64::MIN, -1_000_000, -3, 2, 6, 1_000_000, i64::MAX];
    let mut checked = 0;
    for &x in &far {
        for &y in &far {
            for z in [-1, 0, 1] {
                let p = Position::new([x, y, z]);
                if !ext.source_interval().contains(&p) {
                    assert_eq!(ext.sample(&p), -4.25);
                    checked += 1;
                }
            }
        }
    }
    assert!(checked > 100);
    assert_eq!(ext.sample(&Position::new([0, 4, 0])), 1.5);
}

#[test]
fn depth_preserved_for_per_plane_transforms() {
    let img = ArrayImg::from_fn(Interval::from_dims(&[6, 5, 4]).unwrap(), |p| p[2] as f32).unwrap();
    let (s, c) = 30f64.to_radians().sin_cos();
    for tz in [0.0, 0.3, 0.5, -2.7] {
        let matrix = [c, -s, 0.0, 1.5, s, c, 0.0, -0.25, 0.0, 0.0, 1.0, tz];
        let out = affine(&AnyImg::from(img.clone()), &ResampleConfig::new(matrix)).unwrap();
        assert_eq!(out.interval().dimension(2), 4, "tz = {tz}");
    }

    // a z scale is not a per-plane transform
    let stretch = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0];
    let out = affine(&AnyImg::from(img), &ResampleConfig::new(stretch)).unwrap();
    assert_eq!(out.interval().dimension(2), 7);
}

#[test]
fn half_pixel_translation_averages_the_square() {
    let img = ArrayImg::from_vec(&[2, 2], vec![1.0f64, 2.0, 3.0, 4.0]).unwrap();
    let matrix = [1.0, 0.0, 0.5, 0.0, 1.0, 0.5];

    let lin = Mode::Linear.interpolate(OutOfBoundsFactory::zero().extend(&img));
    assert_relative_eq!(lin.sample_at(&RealPosition::from([0.5, 0.5])), 2.5);

    let out = affine_real(&img, &matrix, Mode::Linear, &OutOfBoundsFactory::zero()).unwrap();
    assert_eq!(out.interval(), &Interval::from_dims(&[3, 3]).unwrap());
    assert_relative_eq!(out.sample(&Position::new([1, 1])), 2.5);
}

#[test]
fn dispatch_preserves_element_type() {
    let config = ResampleConfig::new([0.0, -1.0, 3.0, 1.0, 0.0, 0.0]);
    let cases: Vec<AnyImg> = vec![
        ArrayImg::new(&[4, 4], 3u8).unwrap().into(),
        ArrayImg::new(&[4, 4], -3i16).unwrap().into(),
        ArrayImg::new(&[4, 4], half::f16::ONE).unwrap().into(),
        ArrayImg::new(&[4, 4], Argb(0xFF10_2030)).unwrap().into(),
    ];
    for img in cases {
        let out = affine(&img, &config).unwrap();
        assert_eq!(out.type_name(), img.type_name());
        assert_eq!(out.interval().dimensions(), vec![4, 4]);
    }
}
