//! Example: restriction digest next to a 1 kb ladder
//!
//! Runs a 1 % agarose gel at 5 V/cm with two lanes:
//!
//! - `ladder`: GeneRuler 1 kb preset (14 bands, 0.5 µg)
//! - `digest`: four fragments with unknown quantities, 10 µl loaded
//!
//! Prints the band table and the fitted transport parameters, then writes
//! CSV tables and diagnostic plots to `output/`.
//!
//! ```bash
//! RUST_LOG=info cargo run --example gel_run
//! ```

use gel_rs::{
    gel::{BandwidthMode, Gel, Geometry, RunConfiguration},
    output::{
        export_bands_csv, export_fit_csv, plot_ferguson, plot_lane_profiles, plot_vwbr_fit, CsvConfig,
        CsvMetadata,
    },
    sample::{ladder, DnaFragment, Sample},
    units::Quantity,
};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════");
    println!("  Agarose gel: 1 kb ladder and restriction digest");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Samples ======

    let digest = Sample::new(
        DnaFragment::from_lengths(&[650, 1400, 3200, 7800]),
        vec![],
        Quantity::new(10.0, "ul")?,
    )?;
    let lanes = vec![ladder("1kb_GeneRuler")?, digest];

    // ====== Gel ======

    let mut gel = Gel::with_names(lanes, vec!["ladder".into(), "digest".into()])?;
    gel.set_percent(Quantity::new(1.0, "%")?)?;
    gel.set_field(Quantity::new(5.0, "V/cm")?)?;
    gel.set_well_depth(Some(Quantity::new(0.5, "cm")?))?;

    let config = RunConfiguration::default()
        .with_geometry(Geometry::Vertical)
        .with_bandwidth_mode(BandwidthMode::Both)
        .with_exposure(0.2);

    let start = Instant::now();
    let run = gel.run(&config)?.clone();
    println!("Run computed in {:.1} ms\n", start.elapsed().as_secs_f64() * 1e3);

    // ====== Report ======

    let (h, m, s) = run.run_time_hms();
    println!("Run time        : {}h {:02}m {:04.1}s", h, m, s);
    println!(
        "vWBR fit        : μS = {:.3e}, μL = {:.3e} cm²/(V·s), γ = {:.0} bp",
        run.vwbr.params.mu_s, run.vwbr.params.mu_l, run.vwbr.params.gamma
    );
    println!("Free solution μ0: {:.3e} cm²/(V·s)", run.mu0);
    println!("Pore size       : {:.1} nm\n", run.diffusion.pore_size * 1e9);

    println!("{:<8} {:>10} {:>10} {:>10} {:>10} {:>10}  regime", "lane", "length", "ng", "dist (cm)", "width", "I");
    for band in run.bands() {
        println!(
            "{:<8} {:>10} {:>10.1} {:>10.3} {:>10.3} {:>10.3}  {}",
            band.lane_name,
            band.label,
            band.quantity,
            band.distance,
            band.bandwidth,
            band.intensity,
            band.regime.as_str()
        );
    }

    // ====== Output ======

    std::fs::create_dir_all("output")?;

    let mut metadata = CsvMetadata::from_run(&run);
    metadata.add_custom("geometry", "vertical");
    let csv = CsvConfig::default().with_metadata(metadata);
    export_bands_csv(&run, "output/gel_bands.csv", Some(&csv))?;
    export_fit_csv(&run, "output/gel_vwbr_fit.csv", None)?;

    plot_vwbr_fit(&run, "output/gel_vwbr_fit.svg", None)?;
    plot_ferguson(&run.ferguson, "output/gel_ferguson.svg", None)?;
    let gel_length = gel.gel_length().value_in("cm")?;
    plot_lane_profiles(&run, gel_length, "output/gel_lanes.png", None)?;

    let frame = gel.render_frame(None)?;
    let (w, h) = frame.image_size();
    println!("\nRender frame: {} × {} px", w, h);
    println!("Wrote output/gel_bands.csv, output/gel_vwbr_fit.{{csv,svg}}, output/gel_ferguson.svg, output/gel_lanes.png");

    Ok(())
}
