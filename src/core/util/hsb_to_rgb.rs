use crate::core::data::colour::Colour;

/// Converts hue/saturation/brightness, each in `[0, 1]`, to 8-bit RGB.
///
/// Hue wraps at 1.0 and is split into six 60° sectors with linear
/// interpolation inside each one. Channels round half up, so full
/// saturation and brightness at hue 0 give pure red.
#[must_use]
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Colour {
    if saturation == 0.0 {
        let v = to_channel(brightness);
        return Colour::new(v, v, v);
    }

    let h = (hue - hue.floor()) * 6.0;
    let sector = h.floor();
    let f = h - sector;

    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        5 => (brightness, p, q),
        // `h` can round up to exactly 6.0 for hues just below 1.0.
        _ => (brightness, t, p),
    };

    Colour::new(to_channel(r), to_channel(g), to_channel(b))
}

fn to_channel(value: f32) -> u8 {
    (value * 255.0 + 0.5) as u8
}
