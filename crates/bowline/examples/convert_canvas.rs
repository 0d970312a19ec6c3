use bowline::{build_hierarchy, render_flowchart, CanvasData, ColorOverrides};

fn main() {
    let input = r#"{
        "nodes": [
            {"id": "pipeline", "type": "group", "label": "Pipeline", "x": -40, "y": -40, "width": 560, "height": 180},
            {"id": "parse", "type": "text", "text": "Parse", "color": "4", "x": 0, "y": 0, "width": 140, "height": 60},
            {"id": "build", "type": "text", "text": "Build", "x": 180, "y": 0, "width": 140, "height": 60},
            {"id": "render", "type": "text", "text": "Render", "x": 360, "y": 0, "width": 140, "height": 60},
            {"id": "docs", "type": "file", "file": "notes/pipeline.md", "x": 0, "y": 240, "width": 200, "height": 60}
        ],
        "edges": [
            {"id": "e1", "fromNode": "parse", "toNode": "build"},
            {"id": "e2", "fromNode": "build", "toNode": "render", "label": "hierarchy", "color": "2"},
            {"id": "e3", "fromNode": "pipeline", "toNode": "docs", "fromEnd": "none", "toEnd": "none"}
        ]
    }"#;

    let data = CanvasData::from_json_str(input).unwrap();

    println!("=== Hierarchy ===");
    let hierarchy = build_hierarchy(&data).unwrap();
    for node in &hierarchy.nodes {
        match &node.children {
            Some(children) => println!("{} contains {:?}", node.id(), children),
            None => println!("{} is a leaf", node.id()),
        }
    }

    println!("\n=== Mermaid (LR) ===");
    let flowchart = render_flowchart(&data, &ColorOverrides::new(), "LR").unwrap();
    println!("{}", flowchart);
}
