use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use spec_card_renderer::layout::compose_card;
use spec_card_renderer::render::render_svg;
use spec_card_renderer::{
    CableInfo, CardImages, DataSlot, ImageAsset, InsetLabels, RenderRequest, TemplateId,
};
use std::hint::black_box;

fn synthetic_photo(width: u32, height: u32) -> ImageAsset {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128, 255]);
        }
    }
    ImageAsset::from_rgba8(width, height, pixels).expect("synthetic photo")
}

fn full_request(template: TemplateId, photo: &ImageAsset) -> RenderRequest {
    let mut request = RenderRequest::new(template);
    request.data_slots = vec![
        DataSlot::new("2000mAh", "Battery"),
        DataSlot::new("65W", "Fast\ncharge"),
        DataSlot::new("3", "Ports"),
        DataSlot::new("IP67", ""),
    ];
    request.images = CardImages {
        primary: Some(photo.clone()),
        secondary1: Some(photo.clone()),
        secondary2: Some(photo.clone()),
    };
    request.inset_labels = InsetLabels {
        secondary1: "USB-C".to_string(),
        secondary2: "Lightning".to_string(),
    };
    request.cable = CableInfo::shown("120 cm");
    request
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let photo = synthetic_photo(64, 48);
    for template in TemplateId::ALL {
        let request = full_request(template, &photo);
        group.bench_with_input(
            BenchmarkId::from_parameter(template.as_str()),
            &request,
            |b, data| b.iter(|| compose_card(black_box(data))),
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let photo = synthetic_photo(64, 48);
    for template in TemplateId::ALL {
        let scene = compose_card(&full_request(template, &photo));
        group.bench_with_input(
            BenchmarkId::from_parameter(template.as_str()),
            &scene,
            |b, data| b.iter(|| render_svg(black_box(data))),
        );
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_compose, bench_render
);
criterion_main!(benches);
