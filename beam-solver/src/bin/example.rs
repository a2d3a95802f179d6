//! Beam Solver Example - cantilever and propped cantilever

use beam_solver::prelude::*;

fn print_analysis(title: &str, analysis: &Analysis) {
    println!("=== {} ===\n", title);

    println!("Supports:");
    for (i, support) in analysis.model.supports().iter().enumerate() {
        println!("  S{}: {}", i + 1, support);
    }
    println!("Point loads:");
    for (i, load) in analysis.model.point_loads().iter().enumerate() {
        println!("  F{}: {}", i + 1, load);
    }
    println!("Distributed loads:");
    for (i, load) in analysis.model.distributed_loads().iter().enumerate() {
        println!("  DL{}: {}", i + 1, load);
    }

    let result = &analysis.result;
    println!("\nReactions:");
    for r in &result.reactions {
        println!(
            "  {} ({} @ {} m): R = {:.4} kN, M = {:.4} kN·m",
            r.label, r.kind, r.position, r.force, r.moment
        );
    }

    println!("\nPoints of interest:");
    println!("  {:<10} {:>8} {:>12} {:>12} {:>12}", "Label", "x (m)", "M (kN·m)", "V- (kN)", "V+ (kN)");
    for p in &result.points_of_interest {
        println!(
            "  {:<10} {:>8.3} {:>12.4} {:>12.4} {:>12.4}",
            p.label, p.position, p.moment, p.shear_left, p.shear_right
        );
    }

    let s = &result.summary;
    println!("\nSummary:");
    println!("  Max moment: {:.4} kN·m at x = {:.3} m", s.max_moment, s.max_moment_position);
    println!("  Min moment: {:.4} kN·m at x = {:.3} m", s.min_moment, s.min_moment_position);
    println!("  Max |shear|: {:.4} kN", s.max_abs_shear);
    println!(
        "  Sum of reactions: {:.4} kN (applied {:.4} kN)",
        s.total_reaction,
        analysis.model.total_applied_force()
    );
    println!("  Nodes: {}, segments: {}\n", s.num_nodes, s.num_segments);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let backend = StiffnessBackend::default();

    // Cantilever: fixed at x = 0, 10 kN down at x = 2
    let mut session = BeamSession::new();
    session.add_support(Support::fixed(0.0));
    session.add_point_load(PointLoad::new(2.0, -10.0));
    let analysis = session.analyze(&backend)?;
    print_analysis("Cantilever", &analysis);

    // Propped cantilever: roller at x = 0, fixed at x = 5, 5 kN/m down over the span
    session.reset();
    session.add_support(Support::roller(0.0));
    session.add_support(Support::fixed(5.0));
    session.add_distributed_load(DistributedLoad::uniform(0.0, 5.0, -5.0));
    let analysis = session.analyze(&backend)?;
    print_analysis("Propped Cantilever", &analysis);

    // An inadmissible beam is rejected before analysis
    session.reset();
    session.add_support(Support::roller(2.5));
    match session.analyze(&backend) {
        Ok(_) => println!("Unexpectedly analyzed a beam on a single roller"),
        Err(e) => println!("Rejected single roller: {} [{}]", e, e.kind()),
    }

    Ok(())
}
