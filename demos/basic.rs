use prominence::image::io::Reader as ImageReader;
use prominence::Palette;

fn main() {
    let reader = ImageReader::open("cover.jpg").unwrap();
    let img = reader.decode().unwrap();
    let buf = img.to_rgb8();

    let palette = Palette::from_image(buf).generate().unwrap();

    println!("{:#?}", palette);
}
