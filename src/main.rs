use std::cell::RefCell;
use std::rc::Rc;

use ruas_gis::api::auth::Config;
use ruas_gis::map::Viewport;
use ruas_gis::util::geo::GeoUtils;
use ruas_gis::App;

#[tokio::main]
async fn main() {
    let config = Config::load().expect("Unable to open config.toml");

    let mut app = App::login(config).await.expect("Login failed");
    let count = app.refresh().await.expect("Unable to fetch ruas jalan");
    println!("Fetched {} ruas jalan", count);

    let viewport = Rc::new(RefCell::new(Viewport::new(1280, 720)));
    app.attach_focus(Rc::clone(&viewport));

    let layer = app.layer();
    layer.fit(&mut viewport.borrow_mut());
    println!("Renderable shapes: {}", layer.shapes.len());

    let total_m: f64 = layer
        .shapes
        .iter()
        .map(|shape| GeoUtils::path_length_m(&shape.path))
        .sum();
    println!("Total mapped length: {:.1} km", total_m / 1000.0);

    if let Some(bounds) = &layer.bounds {
        let center = bounds.center();
        println!("Network center: ({:.6}, {:.6})", center.y, center.x);
    }

    if let Some(first) = app.segments().first().cloned() {
        app.selection.select(first);

        let focused = viewport.borrow();
        println!(
            "Focused on the first ruas: center ({:.6}, {:.6}) at zoom {:.1}",
            focused.center().y,
            focused.center().x,
            focused.zoom()
        );
    }
}
