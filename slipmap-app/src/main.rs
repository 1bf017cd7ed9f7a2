use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use slipmap::prelude::*;
use std::time::Duration;

/// Headless driver for the slipmap camera: prints visible tiles and replays
/// a scripted gesture tour on a real frame clock
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    view: ViewArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ViewArgs {
    /// initial center as lng,lat
    #[arg(long, value_name = "lng,lat", num_args = 2, value_delimiter = ',', default_values_t = [51.4043, 35.7219], allow_hyphen_values = true)]
    center: Vec<f64>,

    /// initial zoom level
    #[arg(long, default_value_t = 8.0)]
    zoom: f64,

    /// screen size as width,height in pixels
    #[arg(long, value_name = "w,h", num_args = 2, value_delimiter = ',', default_values_t = [800.0, 600.0])]
    size: Vec<f64>,

    /// tile URL template with {z}/{x}/{y} and optional {s}
    #[arg(long)]
    template: Option<String>,

    /// subdomains substituted for {s}
    #[arg(long, value_delimiter = ',', default_value = "a,b,c")]
    subdomains: Vec<String>,

    /// JSON file with map options
    #[arg(long)]
    options: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// print the tiles covering the initial view
    Tiles {
        /// print tile URLs instead of keys
        #[arg(long)]
        urls: bool,
    },
    /// fly to a point, zoom at the cursor and drag, ticking frames in real time
    Tour {
        /// destination as lng,lat
        #[arg(long, value_name = "lng,lat", num_args = 2, value_delimiter = ',', default_values_t = [2.3522, 48.8566], allow_hyphen_values = true)]
        to: Vec<f64>,

        /// frames per second of the animation loop
        #[arg(long, default_value_t = 60)]
        fps: u32,
    },
}

fn build_map(view: &ViewArgs) -> Result<Map> {
    let options = match &view.options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading options from {}", path.display()))?;
            MapOptions::from_json(&json)?
        }
        None => MapOptions::default(),
    };

    let mut builder = MapBuilder::new()
        .with_center_and_zoom(GeoPoint::new(view.center[0], view.center[1]), view.zoom)
        .with_size(view.size[0], view.size[1])
        .with_options(options);

    if let Some(template) = &view.template {
        let subdomains: Vec<&str> = view.subdomains.iter().map(String::as_str).collect();
        builder = builder.with_tile_source(Box::new(UrlTemplateSource::new(
            template.as_str(),
            &subdomains,
        )?));
    }

    Ok(builder.build()?)
}

fn print_tiles(map: &Map, urls: bool) {
    let transform = map.transform();
    println!(
        "view: pan=({:.1}, {:.1}) zoom={:.3} tiles={}",
        transform.pan_x,
        transform.pan_y,
        transform.zoom,
        map.visible_tiles().len()
    );
    if urls {
        for (_, url) in map.tile_urls() {
            println!("  {url}");
        }
    } else {
        for tile in map.visible_tiles() {
            println!("  {tile}");
        }
    }
}

/// Ticks the map on a tokio interval until its animation settles
async fn animate(map: &mut Map, clock: &mut FrameClock, fps: u32) {
    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
    clock.reset();
    let mut frames = 0u32;
    loop {
        interval.tick().await;
        frames += 1;
        if !map.update(clock.tick()) {
            break;
        }
    }
    log::info!("settled after {frames} frames");
}

async fn tour(mut map: Map, to: GeoPoint, fps: u32) -> Result<()> {
    if fps == 0 {
        bail!("fps must be positive");
    }

    map.on(EventKind::CenterChanged, |event| {
        if let MapEvent::CenterChanged { center, zoom } = event {
            println!(
                "center changed: lng={:.5} lat={:.5} zoom={:.3}",
                center.lng, center.lat, zoom
            );
        }
    });
    map.on(EventKind::AnimationStart, |_| log::debug!("animation started"));

    let mut clock = FrameClock::new();
    let size = map.viewport().size();

    println!("flying to {to:?}");
    map.set_center(to);
    animate(&mut map, &mut clock, fps).await;
    print_tiles(&map, false);

    let cursor = Point::new(size.x * 0.75, size.y * 0.25);
    println!("zooming in at {cursor:?}");
    for _ in 0..3 {
        map.handle_input(InputEvent::Wheel {
            delta: -60.0,
            position: cursor,
        });
    }
    animate(&mut map, &mut clock, fps).await;
    print_tiles(&map, false);

    println!("dragging");
    map.handle_input(InputEvent::DragStart { position: cursor });
    for _ in 0..20 {
        map.handle_input(InputEvent::Drag {
            delta: Point::new(-15.0, 6.0),
        });
    }
    map.handle_input(InputEvent::DragEnd);
    print_tiles(&map, false);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let map = build_map(&cli.view)?;

    match cli.command {
        Commands::Tiles { urls } => {
            print_tiles(&map, urls);
            Ok(())
        }
        Commands::Tour { to, fps } => tour(map, GeoPoint::new(to[0], to[1]), fps).await,
    }
}
