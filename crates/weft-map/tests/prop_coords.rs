use proptest::prelude::*;
use weft_map::{ColorKey, MapOffset, TemplateMap};

fn arb_offset() -> impl Strategy<Value = MapOffset> {
    (any::<i32>(), any::<i32>()).prop_map(|(dx, dz)| MapOffset::new(dx, dz))
}

fn small_dim() -> impl Strategy<Value = u32> {
    1u32..=16
}

proptest! {
    // pixel -> world -> pixel returns the starting pixel for any offset
    #[test]
    fn world_to_pixel_inverts_pixel_to_world(
        offset in arb_offset(),
        px in any::<i32>(),
        py in any::<i32>(),
    ) {
        let (wx, wz) = offset.pixel_to_world(px, py);
        prop_assert_eq!(offset.world_to_pixel(wx, wz), (px, py));
    }

    // world -> pixel -> world returns the starting column for any offset
    #[test]
    fn pixel_to_world_inverts_world_to_pixel(
        offset in arb_offset(),
        wx in any::<i32>(),
        wz in any::<i32>(),
    ) {
        let (px, py) = offset.world_to_pixel(wx, wz);
        prop_assert_eq!(offset.pixel_to_world(px, py), (wx, wz));
    }

    // Distinct pixels never land on the same world column
    #[test]
    fn mapping_is_injective(
        offset in arb_offset(),
        a in any::<(i32, i32)>(),
        b in any::<(i32, i32)>(),
    ) {
        prop_assume!(a != b);
        let wa = offset.pixel_to_world(a.0, a.1);
        let wb = offset.pixel_to_world(b.0, b.1);
        prop_assert_ne!(wa, wb);
    }

    // Every coordinate outside the template bounds samples as sentinel,
    // and every coordinate inside samples the stored pixel
    #[test]
    fn sampling_respects_half_open_bounds(
        w in small_dim(),
        h in small_dim(),
        px in -64i32..=64,
        py in -64i32..=64,
    ) {
        let fill = ColorKey::new(200, 10, 10);
        let pixels = vec![fill; (w * h) as usize];
        let map = TemplateMap::from_pixels(w, h, pixels);
        let inside = px >= 0 && py >= 0 && (px as u32) < w && (py as u32) < h;
        let expect = if inside { fill } else { ColorKey::SENTINEL };
        prop_assert_eq!(map.color_at(px, py), expect);
    }
}
