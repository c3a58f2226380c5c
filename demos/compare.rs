use console::{style, Style};
use dictdiff::{compare, dict, list, DivergenceKind};

fn main() {
    let first = dict! {
        "name" => "server",
        "ports" => list![80, 443, 8080],
        "limits" => dict! { "cpu" => 2, "memory" => "1Gi" },
        "debug" => false,
    };
    let second = dict! {
        "name" => "server",
        "ports" => list![80, 8443],
        "limits" => dict! { "cpu" => "2", "memory" => "2Gi" },
        "labels" => dict! { "tier" => "web" },
    };

    let comparison = compare(&first, &second).expect("both values are maps");
    if comparison.is_equal() {
        println!("{}", style("equal").green().bold());
        return;
    }

    println!(
        "{} ({} divergences):",
        style("Differences").bold(),
        comparison.divergences().len()
    );
    for divergence in comparison.divergences() {
        let (marker, style) = match divergence.kind() {
            DivergenceKind::ItemRemovedFromSecond => ('-', Style::new().red()),
            DivergenceKind::ItemAddedInSecond => ('+', Style::new().green()),
            DivergenceKind::TypeMismatch => ('!', Style::new().magenta()),
            DivergenceKind::ValueMismatch => ('~', Style::new().yellow()),
        };
        println!(
            "  {} {}",
            style.apply_to(marker).bold(),
            style.apply_to(divergence)
        );
    }
}
