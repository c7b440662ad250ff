use format_span::config::DemoConfig;
use format_span::demo;
use format_span::model::Point;
use format_span::{render, FixedSpan, Span};

fn run_format(config: &DemoConfig) -> String {
    colored::control::set_override(false);
    let mut out = Vec::new();
    demo::format::run(&mut out, &config.format).unwrap();
    String::from_utf8(out).unwrap()
}

fn run_span(config: &DemoConfig) -> String {
    colored::control::set_override(false);
    let mut out = Vec::new();
    demo::span::run(&mut out, &config.span).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_format_lesson_default_output() {
    let text = run_format(&DemoConfig::default());

    assert!(text.contains("Xiao Ming, your final score is 95 points!"));
    assert!(text.contains("format type 'd' is not supported for string values"));
    assert!(text.contains("Apple             5.00\n"));
    assert!(text.contains("PI ≈ 3.1416\n"));
    assert!(text.contains("Hexadecimal with prefix: 0x2a\n"));
    assert!(text.contains("The point is: (10, 20)\n"));
    assert!(text.contains("Right-aligned: [    (10, 20)]\n"));
    assert!(text.contains("Through Display and format!: [  (10, 20)  ]\n"));
    assert!(text.contains("\n*******center*******\n"));
    assert!(text.contains("\n---------------right\n"));
    assert!(text.contains("\nleft----------------\n"));
    assert!(text.contains("Reusing arguments: first, again first, the second is second"));
    assert!(text.contains("template style: Player: Alex, Level: 99\n"));
}

#[test]
fn test_format_lesson_uses_config() {
    let config = DemoConfig::from_toml(
        r#"
        [format]
        student_name = "Li Lei"
        number = 255
        name_width = 8
        price_width = 8
        price_precision = 1
        items = [{ name = "Tea", price = 3.26 }]
        point = { x = -3, y = 4 }
        "#,
    )
    .unwrap();
    let text = run_format(&config);

    assert!(text.contains("Li Lei, your final score is 95 points!"));
    assert!(text.contains("Binary: 11111111\n"));
    assert!(text.contains("Item       Price\n"));
    assert!(text.contains("Tea          3.3\n"));
    assert!(text.contains("The point is: (-3, 4)\n"));
}

#[test]
fn test_span_lesson_default_output() {
    let text = run_span(&DemoConfig::default());

    assert!(text.contains("A phalanx of 3 soldiers has arrived. They are: 1 2 3\n"));
    assert!(text.contains("A phalanx of 4 soldiers has arrived. They are: 4 5 6 7\n"));
    assert!(text.contains("A phalanx of 2 soldiers has arrived. They are: 8 9\n"));
    assert!(text.contains("Middle slice (subspan(1, 3)): 2 3 4\n"));
    assert!(text.contains("Front slice (first(2)): 1 2\n"));
    assert!(text.contains("Back slice (last(2)): 4 5\n"));
    assert!(text.contains("mutable view: 1 20 30 40 5\n"));
    assert!(text.contains("Processing color: R=1, G=0, B=0\n"));
    assert!(text.contains("Processing color: R=0, G=0, B=1\n"));
    assert!(text.contains("expected exactly 3 elements, got 4"));
    assert!(text.contains("Safe span usage: 7\n"));
    assert!(text.contains("Lesson complete"));
}

#[test]
fn test_span_lesson_uses_config() {
    let config = DemoConfig::from_toml(
        r#"
        [span]
        squad = [10, 20, 30, 40, 50, 60]
        red = [0.5, 0.25, 1.0]
        "#,
    )
    .unwrap();
    let text = run_span(&config);

    assert!(text.contains("Original data: 10 20 30 40 50 60\n"));
    assert!(text.contains("Middle slice (subspan(1, 3)): 20 30 40\n"));
    assert!(text.contains("Back slice (last(2)): 50 60\n"));
    assert!(text.contains("Processing color: R=0.5, G=0.25, B=1\n"));
}

#[test]
fn test_views_agree_across_storage_kinds() {
    let vector = vec![3, 1, 4, 1, 5];
    let array = [3, 1, 4, 1, 5];
    let boxed: Box<[i32]> = Box::new([3, 1, 4, 1, 5]);

    let views = [Span::from(&vector), Span::from(&array), Span::from(&boxed)];
    for view in views {
        assert_eq!(view.len(), 5);
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), vector);
    }
}

#[test]
fn test_fixed_span_through_public_api() {
    let color = [0.1f32, 0.2, 0.3];
    let view: FixedSpan<'_, f32, 3> = FixedSpan::from(&color);
    assert_eq!(view.iter().copied().collect::<Vec<_>>(), color.to_vec());
    assert_eq!(Span::from(view).len(), 3);
}

#[test]
fn test_custom_type_in_template() {
    let p = Point { x: 10, y: 20 };
    assert_eq!(render!("{}", p).unwrap(), "(10, 20)");
}
