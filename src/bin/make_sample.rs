//! Generates a sample document exercising the library surface: styled
//! text, wrapping, links, and (when image paths are supplied as
//! arguments) embedded images with captions.
//!
//! Usage: `make_sample [image1 [image2 ...]]` — writes `sample.pdf`.

use pdf_scribe::{
    Document, DocumentMetadata, ImagePlacement, PageSize, PageSpec, SaveOptions, TextAlign,
    TextOptions,
};

fn main() -> pdf_scribe::Result<()> {
    env_logger::init();

    let metadata = DocumentMetadata::new()
        .title("pdf_scribe sample")
        .creator("make_sample");
    let mut doc = Document::with_metadata(metadata);

    // Page 1: A4 portrait, style showcase.
    let page1 = doc.add_page(PageSpec::default().padding(40.0, 40.0));
    {
        let page = doc.page_mut(page1).expect("page exists");
        page.add_text("Default Helvetica", 50.0, 600.0, &TextOptions::default())?;
        page.add_text(
            "Bold Text",
            50.0,
            560.0,
            &TextOptions::default().size(16.0).color("#008800").bold(),
        )?;
        page.add_text(
            "Italic Text",
            50.0,
            540.0,
            &TextOptions::default().size(16.0).color((0, 0, 255)).italic(),
        )?;
        page.add_text(
            "Bold Italic",
            50.0,
            520.0,
            &TextOptions::default()
                .size(16.0)
                .color("purple")
                .bold()
                .italic(),
        )?;

        let long = "This long sentence wraps across multiple lines to show \
                    the max-width wrapping heuristic, with a background fill \
                    for visual emphasis.";
        page.add_text(
            long,
            50.0,
            440.0,
            &TextOptions::default()
                .size(12.0)
                .color("yellow")
                .background("#C666A2")
                .max_width(380.0),
        )?;
        page.add_text(
            "Click here for the project page",
            50.0,
            480.0,
            &TextOptions::default()
                .size(12.0)
                .color("#1327DB")
                .underline()
                .link("https://example.com/pdf_scribe"),
        )?;
        page.add_text(
            "Strike me",
            350.0,
            480.0,
            &TextOptions::default()
                .size(14.0)
                .color("red")
                .strike()
                .align(TextAlign::Center),
        )?;
    }

    // Page 2: A4 landscape with alignment demos.
    let page2 = doc.add_page(PageSpec::new(PageSize::A4).landscape().padding(60.0, 60.0));
    {
        let page = doc.page_mut(page2).expect("page exists");
        page.add_text(
            "Left aligned",
            100.0,
            450.0,
            &TextOptions::default().size(14.0).color("green"),
        )?;
        page.add_text(
            "Centered Text",
            400.0,
            450.0,
            &TextOptions::default()
                .size(14.0)
                .color("gray")
                .align(TextAlign::Center),
        )?;
        page.add_text(
            "Right Aligned",
            700.0,
            450.0,
            &TextOptions::default()
                .size(14.0)
                .color("blue")
                .align(TextAlign::Right),
        )?;
    }

    // Any image paths given on the command line land on page 2 with
    // captions, alternating raw and JPEG embedding.
    for (index, path) in std::env::args().skip(1).enumerate() {
        let compress = index % 2 == 1;
        let name = doc.embed_image(&path, compress)?;
        let placement = ImagePlacement::new(&name, 100.0 + index as f32 * 220.0, 150.0)
            .size(200.0, 150.0)
            .caption(if compress { "JPEG Compressed" } else { "Raw RGB" });
        doc.page_mut(page2).expect("page exists").add_image(placement)?;
    }

    for warning in doc.warnings() {
        eprintln!("layout warning: {}", warning);
    }

    doc.save(
        "sample.pdf",
        &SaveOptions {
            show_page_numbers: true,
        },
    )?;
    println!("sample.pdf generated.");
    Ok(())
}
