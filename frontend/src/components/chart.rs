use chrono::NaiveDate;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::series::{aggregate, AggregatedSeries, DateRange, Grouping};
use shared::TransactionRecord;
use web_sys::{HtmlCanvasElement, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

const INCOME_COLOR: RGBColor = RGBColor(46, 125, 50);
const EXPENSE_COLOR: RGBColor = RGBColor(198, 40, 40);
const LABEL_COLOR: RGBColor = RGBColor(90, 90, 90);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Line,
    Bar,
}

impl ChartType {
    fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ChartType::Line => "Line",
            ChartType::Bar => "Bar",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "line" => Some(ChartType::Line),
            "bar" => Some(ChartType::Bar),
            _ => None,
        }
    }
}

/// Build the aggregator's range filter from the two date inputs. Empty or
/// unparsable input fields count as absent bounds.
fn range_from_inputs(start: &str, end: &str) -> DateRange {
    let parse = |value: &str| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok();
    DateRange::new(parse(start), parse(end))
}

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    pub incomes: Vec<TransactionRecord>,
    pub expenses: Vec<TransactionRecord>,
    pub loading: bool,
}

pub enum Msg {
    SetRangeStart(String),
    SetRangeEnd(String),
    SetGrouping(Grouping),
    SetChartType(ChartType),
}

/// Income-vs-expenses chart. Re-aggregates and redraws whenever the records
/// or any control changes; the aggregation itself is a pure call into
/// `shared::series`.
pub struct Chart {
    canvas_ref: NodeRef,
    range_start: String,
    range_end: String,
    grouping: Grouping,
    chart_type: ChartType,
}

impl Component for Chart {
    type Message = Msg;
    type Properties = ChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
            range_start: String::new(),
            range_end: String::new(),
            grouping: Grouping::Daily,
            chart_type: ChartType::Line,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetRangeStart(value) => self.range_start = value,
            Msg::SetRangeEnd(value) => self.range_end = value,
            Msg::SetGrouping(grouping) => self.grouping = grouping,
            Msg::SetChartType(chart_type) => self.chart_type = chart_type,
        }
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw_chart(ctx.props());
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let on_start_change = link.callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetRangeStart(input.value())
        });
        let on_end_change = link.callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetRangeEnd(input.value())
        });
        let on_grouping_change = link.callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::SetGrouping(Grouping::parse(&select.value()).unwrap_or_default())
        });
        let on_type_change = link.callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::SetChartType(ChartType::parse(&select.value()).unwrap_or(ChartType::Line))
        });

        let has_data = !ctx.props().incomes.is_empty() || !ctx.props().expenses.is_empty();

        html! {
            <div class="chart-container">
                <div class="chart-controls">
                    <div class="control-group">
                        <label for="chart-start">{"Start Date:"}</label>
                        <input
                            type="date"
                            id="chart-start"
                            value={self.range_start.clone()}
                            onchange={on_start_change}
                        />
                        <label for="chart-end">{"End Date:"}</label>
                        <input
                            type="date"
                            id="chart-end"
                            value={self.range_end.clone()}
                            onchange={on_end_change}
                        />
                    </div>
                    <div class="control-group">
                        <label for="chart-grouping">{"Group By:"}</label>
                        <select id="chart-grouping" onchange={on_grouping_change}>
                            {for Grouping::all().iter().map(|grouping| {
                                html! {
                                    <option
                                        value={grouping.as_str()}
                                        selected={*grouping == self.grouping}
                                    >
                                        {grouping.label()}
                                    </option>
                                }
                            })}
                        </select>
                    </div>
                    <div class="control-group">
                        <label for="chart-type">{"Chart Type:"}</label>
                        <select id="chart-type" onchange={on_type_change}>
                            {for [ChartType::Line, ChartType::Bar].iter().map(|chart_type| {
                                html! {
                                    <option
                                        value={chart_type.as_str()}
                                        selected={*chart_type == self.chart_type}
                                    >
                                        {chart_type.label()}
                                    </option>
                                }
                            })}
                        </select>
                    </div>
                </div>

                {if !has_data && ctx.props().loading {
                    html! { <div class="chart-loading">{"Loading chart data..."}</div> }
                } else if !has_data {
                    html! { <div class="chart-empty">{"No transaction data available for chart"}</div> }
                } else {
                    html! {
                        <canvas
                            ref={self.canvas_ref.clone()}
                            class="chart-canvas"
                            width="800"
                            height="350"
                        ></canvas>
                    }
                }}
            </div>
        }
    }
}

impl Chart {
    fn draw_chart(&self, props: &ChartProps) {
        let range = range_from_inputs(&self.range_start, &self.range_end);
        let series = aggregate(&props.incomes, &props.expenses, &range, self.grouping);

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };

        canvas.set_width(800);
        canvas.set_height(350);

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };

        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }
        if series.is_empty() {
            return;
        }

        let labels: Vec<String> = series.labels().iter().map(|s| s.to_string()).collect();
        let bucket_count = series.len();
        let y_max = (series.max_value() * 1.1).max(1.0);
        let x_range = -0.5f64..(bucket_count as f64 - 0.5);

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, 0f64..y_max)
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        let label_for_tick = {
            let labels = labels.clone();
            move |v: &f64| {
                let index = v.round();
                if (v - index).abs() > 0.01 || index < 0.0 {
                    return String::new();
                }
                labels
                    .get(index as usize)
                    .cloned()
                    .unwrap_or_default()
            }
        };

        if chart
            .configure_mesh()
            .y_desc("Amount")
            .x_label_formatter(&label_for_tick)
            .x_labels(bucket_count.min(8))
            .y_labels(8)
            .label_style(("sans-serif", 12).into_font().color(&LABEL_COLOR))
            .axis_style(&RGBColor(230, 230, 230))
            .bold_line_style(&RGBColor(245, 245, 245))
            .light_line_style(&RGBColor(250, 250, 250))
            .draw()
            .is_err()
        {
            return;
        }

        match self.chart_type {
            ChartType::Line => self.draw_lines(&mut chart, &series),
            ChartType::Bar => self.draw_bars(&mut chart, &series),
        }

        let _ = root.present();
    }

    fn draw_lines(
        &self,
        chart: &mut ChartContext<'_, CanvasBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        series: &AggregatedSeries,
    ) {
        let income_points = series
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.income));
        let expense_points = series
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.expense));

        if chart
            .draw_series(LineSeries::new(income_points.clone(), INCOME_COLOR.stroke_width(3)))
            .is_err()
        {
            return;
        }
        let _ = chart.draw_series(LineSeries::new(expense_points.clone(), EXPENSE_COLOR.stroke_width(3)));

        // Mark each bucket so single-bucket series stay visible
        let _ = chart.draw_series(
            income_points.map(|point| Circle::new(point, 4, INCOME_COLOR.filled())),
        );
        let _ = chart.draw_series(
            expense_points.map(|point| Circle::new(point, 4, EXPENSE_COLOR.filled())),
        );
    }

    fn draw_bars(
        &self,
        chart: &mut ChartContext<'_, CanvasBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        series: &AggregatedSeries,
    ) {
        let income_bars = series.points.iter().enumerate().map(|(i, p)| {
            let x = i as f64;
            Rectangle::new([(x - 0.35, 0.0), (x - 0.02, p.income)], INCOME_COLOR.filled())
        });
        let expense_bars = series.points.iter().enumerate().map(|(i, p)| {
            let x = i as f64;
            Rectangle::new([(x + 0.02, 0.0), (x + 0.35, p.expense)], EXPENSE_COLOR.filled())
        });

        if chart.draw_series(income_bars).is_err() {
            return;
        }
        let _ = chart.draw_series(expense_bars);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_from_inputs() {
        let range = range_from_inputs("2024-02-01", "2024-02-29");
        assert!(range.is_complete());

        let half = range_from_inputs("2024-02-01", "");
        assert!(!half.is_complete());
        assert!(half.start.is_some());

        let garbage = range_from_inputs("soon", "later");
        assert_eq!(garbage, DateRange::default());
    }

    #[test]
    fn test_chart_type_parse_round_trip() {
        for chart_type in [ChartType::Line, ChartType::Bar] {
            assert_eq!(ChartType::parse(chart_type.as_str()), Some(chart_type));
        }
        assert_eq!(ChartType::parse("pie"), None);
    }

    #[test]
    fn test_chart_data_preparation() {
        // The chart feeds its controls straight into the aggregator; verify
        // the pipeline it draws from.
        let incomes = vec![TransactionRecord {
            id: "record::income::1".to_string(),
            title: "Salary".to_string(),
            amount: 100.0,
            date: "2024-01-01".to_string(),
            category: "work".to_string(),
            description: String::new(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }];

        let range = range_from_inputs("", "");
        let series = aggregate(&incomes, &[], &range, Grouping::Daily);

        assert_eq!(series.labels(), vec!["2024-01-01"]);
        assert_eq!(series.max_value(), 100.0);
    }
}
