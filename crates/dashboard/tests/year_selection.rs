use analytics::AnalyticsEngine;
use dashboard::{
    dispatch, initial_layout, ControlId, DashboardContext, Figure, OutputId, OutputValue, Trace,
};

const ORDERS_CSV: &str = "\
Customer ID,Country,Order Date,Ship Date,Postal Code,Product ID,Category,Sub-Category,Product Name,Sales,Profit,Quantity
A,USA,2020-01-01,2020-01-03,10001,P1,Office Supplies,Paper,Copy Paper,500,50,2
B,France,2020-02-01,2020-02-04,,P2,Technology,Phones,Desk Phone,1500,-100,1
A,USA,2021-03-01,2021-03-02,10001,P1,Office Supplies,Paper,Copy Paper,200,20,1
";

fn context() -> DashboardContext {
    let transactions = loader::load_csv(ORDERS_CSV.as_bytes()).unwrap();
    DashboardContext::from_transactions(&AnalyticsEngine::default(), &transactions)
}

fn figure(value: &OutputValue) -> &Figure {
    match value {
        OutputValue::Figure(figure) => figure,
        OutputValue::Text(text) => panic!("expected a figure, got {text:?}"),
    }
}

/// (band label, countries) for every map layer.
fn map_layers(figure: &Figure) -> Vec<(String, Vec<String>)> {
    figure
        .data
        .iter()
        .map(|trace| match trace {
            Trace::ScatterGeo(layer) => (layer.name.clone(), layer.locations.clone()),
            other => panic!("expected scattergeo, got {other:?}"),
        })
        .collect()
}

#[test]
fn slider_moves_countries_between_bands() {
    let ctx = context();
    assert_eq!(ctx.years(), [2020, 2021]);

    let updates = dispatch(&ctx, ControlId::YearSlider, 2020);
    assert_eq!(updates[0].output, OutputId::WorldMap);
    let layers = map_layers(figure(&updates[0].value));
    assert_eq!(layers[0], ("$0 - $1000".to_string(), vec!["USA".to_string()]));
    assert_eq!(layers[1], ("$1000 - $5000".to_string(), vec!["France".to_string()]));
    assert!(layers[2].1.is_empty() && layers[3].1.is_empty());

    let updates = dispatch(&ctx, ControlId::YearSlider, 2021);
    let layers = map_layers(figure(&updates[0].value));
    assert_eq!(layers[0].1, ["USA"]);
    assert!(layers[1..].iter().all(|(_, countries)| countries.is_empty()));
    let Trace::ScatterGeo(low) = &figure(&updates[0].value).data[0] else {
        panic!("expected scattergeo");
    };
    assert_eq!(low.marker.size, [2.0]);
    assert_eq!(
        updates[1].value,
        OutputValue::Text("Total Sales by Country in 2021".to_string())
    );
}

#[test]
fn dropdown_splits_the_year_by_category() {
    let ctx = context();
    let updates = dispatch(&ctx, ControlId::YearDropdown, 2020);

    let Trace::Pie(categories) = &figure(&updates[0].value).data[0] else {
        panic!("expected a pie");
    };
    assert_eq!(categories.labels, ["Office Supplies", "Technology"]);
    assert_eq!(categories.values, [500.0, 1500.0]);

    let Trace::Pie(sub_categories) = &figure(&updates[1].value).data[0] else {
        panic!("expected a pie");
    };
    assert_eq!(sub_categories.labels, ["Paper", "Phones"]);
}

#[test]
fn first_screen_starts_on_the_earliest_year() {
    let layout = initial_layout(&context()).unwrap();

    assert_eq!(layout.year_slider.value, 2020);
    assert_eq!(layout.year_slider.max, 2021);
    assert_eq!(layout.year_slider.step, 1_u32);
    assert_eq!(layout.year_dropdown.options, [2020, 2021]);

    let outputs: Vec<OutputId> = layout.updates.iter().map(|u| u.output).collect();
    assert_eq!(
        outputs,
        [
            OutputId::TopProductsBar,
            OutputId::WorldMap,
            OutputId::WorldMapCaption,
            OutputId::PieCategory,
            OutputId::PieSubCategory,
        ]
    );

    // P1 spans both years.
    let Trace::Bar(sales) = &figure(&layout.updates[0].value).data[0] else {
        panic!("expected a bar");
    };
    assert_eq!(sales.y, ["P1_Paper", "P2_Phones"]);
    assert_eq!(sales.x, [700.0, 1500.0]);
}
