use prominence::image::io::Reader as ImageReader;
use prominence::{Argb, Filter, Palette};

const BLACK_MAX_LIGHTNESS: f32 = 0.02;
const WHITE_MIN_LIGHTNESS: f32 = 0.90;

// allows more darker colors and blocks more lighter colors than the default filter
struct CustomFilter;
impl Filter for CustomFilter {
    fn is_allowed(&self, _: Argb, (_, _, l): (f32, f32, f32)) -> bool {
        !is_black(l) && !is_white(l)
    }
}

fn is_black(l: f32) -> bool {
    l <= BLACK_MAX_LIGHTNESS
}

fn is_white(l: f32) -> bool {
    l >= WHITE_MIN_LIGHTNESS
}

fn main() {
    let reader = ImageReader::open("cover.jpg").unwrap();
    let img = reader.decode().unwrap();
    let buf = img.to_rgb8();

    let palette = Palette::from_image(buf)
        .clear_filters() // remove the default filter
        .add_filter(CustomFilter) // add our custom filter
        .generate()
        .unwrap();

    println!("{:#?}", palette);
}
