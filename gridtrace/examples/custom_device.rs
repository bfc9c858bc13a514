//! Build a protective device in code and print its coordination polygon.

use gridtrace::protection::{
    CurveArg, CurveFamily, CurveSegment, Field, ParameterSet, ProtectionModel, VarScope,
};

fn main() {
    let mut parameters = ParameterSet::new();
    parameters.insert(
        "tms",
        Field::new("Time multiplier", "", 0.1).with_selection(vec![0.05, 0.1, 0.2, 0.4]),
    );
    parameters.insert("i_n", Field::new("Pickup current", "A", 400.0));

    let band = |tms: CurveArg| {
        vec![CurveSegment::new(
            CurveFamily::IecInverse,
            vec![
                tms,
                CurveArg::var(VarScope::Setting, "i_n"),
                CurveArg::Literal(440.0),
                CurveArg::Literal(20_000.0),
                CurveArg::Literal(0.01),
                CurveArg::Literal(25.0),
            ],
        )]
    };

    let model = ProtectionModel::new(
        "Feeder relay",
        parameters,
        band(CurveArg::Literal(0.2)),
        band(CurveArg::var(VarScope::Setting, "tms")),
    );

    let device = model.evaluate_with_defaults().expect("valid curve spec");
    let region = device.coordination_region().expect("non-degenerate curves");

    println!("{}", device.title);
    println!("polygon ({} points):", region.polygon.len());
    for point in &region.polygon {
        println!("  {:10.1} A  {:8.3} s", point.current, point.time);
    }
}
