//! Output formatters - console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{AlignerError, Result};
use crate::model::SkillCluster;
use crate::output::report::*;
use crate::recommendations::{Priority, RecommendationDraft};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Gaps shown outside detailed mode.
const SUMMARY_GAP_COUNT: usize = 5;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Curriculum Alignment Report: {{ program_name }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 960px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #0d9488;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .band-strong { background: #0d9488; }
        .band-moderate { background: #d4a017; color: #000; }
        .band-high_risk { background: #ef4444; }
        .section h2 {
            color: #0d9488;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #e9ecef; }
        .recommendation {
            background: #f8f9fa;
            padding: 15px;
            margin: 10px 0;
            border-radius: 6px;
            border-left: 4px solid #17a2b8;
        }
        .priority-critical { border-left-color: #dc3545; }
        .priority-high { border-left-color: #ffc107; }
        .priority-medium { border-left-color: #17a2b8; }
        .priority-low { border-left-color: #28a745; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Curriculum Alignment Report</h1>
            <p>{{ program_name }} vs {{ benchmark_name }} ({{ benchmark_source }}) | Mode: {{ program_mode }}</p>
            <p>Generated: {{ generated_at }}</p>
        </div>

        <div class="section">
            <h2>Summary</h2>
            <h3>WAI Score: {{ wai_score }}% <span class="score-badge band-{{ band_class }}">{{ band_label }}</span></h3>
            <p><strong>Verdict:</strong> {{ verdict }}</p>
            <p><strong>Benchmark similarity:</strong> {{ similarity }} | <strong>Weights:</strong> {{ weights_name }}</p>
            <table>
                <tr><th>Cluster</th><th>Score</th><th>Coverage</th></tr>
                {% for row in clusters %}
                <tr><td>{{ row.label }}</td><td>{{ row.score }}%</td><td>{{ row.coverage }}</td></tr>
                {% endfor %}
            </table>
        </div>

        {% if has_gaps %}
        <div class="section">
            <h2>Skill Gaps</h2>
            <table>
                <tr><th>Skill</th><th>Cluster</th><th>Coverage</th><th>Benchmark</th><th>Gap</th></tr>
                {% for gap in gaps %}
                <tr><td>{{ gap.skill }}</td><td>{{ gap.cluster }}</td><td>{{ gap.coverage }}%</td><td>{{ gap.expected }}%</td><td>{{ gap.gap }}</td></tr>
                {% endfor %}
            </table>
        </div>
        {% endif %}

        {% if has_redundancy %}
        <div class="section">
            <h2>Redundant Courses (score {{ redundancy_score }})</h2>
            <ul>
                {% for pair in redundant %}
                <li>{{ pair.first }} / {{ pair.second }}: {{ pair.overlap }}</li>
                {% endfor %}
            </ul>
        </div>
        {% endif %}

        <div class="section">
            <h2>Course Structure</h2>
            <p><strong>Depth:</strong> basic {{ depth_basic }}%, applied {{ depth_applied }}%, advanced {{ depth_advanced }}%</p>
            <p><strong>Theory / practice:</strong> {{ theory }}% / {{ practice }}%</p>
        </div>

        {% if has_recommendations %}
        <div class="section">
            <h2>Recommendations</h2>
            {% for rec in recommendations %}
            <div class="recommendation priority-{{ rec.priority }}">
                <h4>{{ rec.title }}</h4>
                <p dir="rtl">{{ rec.title_ar }}</p>
                <p><strong>Type:</strong> {{ rec.kind }} | <strong>Priority:</strong> {{ rec.priority }}</p>
                <p>{{ rec.description }}</p>
            </div>
            {% endfor %}
        </div>
        {% endif %}

        <div class="metadata">
            <p><strong>Generated by Curriculum Aligner v{{ version }}</strong> | Certification catalog {{ catalog_version }}</p>
            {% if has_analysis_id %}<p><strong>Analysis:</strong> {{ analysis_id }}</p>{% endif %}
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    program_name: String,
    benchmark_name: String,
    benchmark_source: String,
    program_mode: String,
    generated_at: String,
    wai_score: u32,
    band_class: String,
    band_label: String,
    verdict: String,
    similarity: String,
    weights_name: String,
    clusters: Vec<HtmlClusterRow>,
    gaps: Vec<HtmlGapRow>,
    has_gaps: bool,
    redundant: Vec<HtmlRedundantRow>,
    has_redundancy: bool,
    redundancy_score: u32,
    depth_basic: u32,
    depth_applied: u32,
    depth_advanced: u32,
    theory: u32,
    practice: u32,
    recommendations: Vec<HtmlRecommendation>,
    has_recommendations: bool,
    version: String,
    catalog_version: String,
    analysis_id: String,
    has_analysis_id: bool,
}

struct HtmlClusterRow {
    label: String,
    score: u32,
    coverage: String,
}

struct HtmlGapRow {
    skill: String,
    cluster: String,
    coverage: u32,
    expected: u32,
    gap: u32,
}

struct HtmlRedundantRow {
    first: String,
    second: String,
    overlap: String,
}

struct HtmlRecommendation {
    title: String,
    title_ar: String,
    kind: String,
    priority: String,
    description: String,
}

fn coverage_text(report: &AnalysisReport, cluster: SkillCluster) -> String {
    report
        .analysis
        .coverage_by_cluster
        .get(&cluster)
        .map(|c| format!("{}%", c))
        .unwrap_or_else(|| "n/a".to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: AlignmentBand) -> String {
        let color = match band {
            AlignmentBand::Strong => Color::Green,
            AlignmentBand::Moderate => Color::Yellow,
            AlignmentBand::HighRisk => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_priority_icon(&self, priority: Priority) -> &'static str {
        if self.use_colors {
            match priority {
                Priority::Critical => "🚨 ",
                Priority::High => "⚠️ ",
                Priority::Medium => "📋 ",
                Priority::Low => "💡 ",
            }
        } else {
            match priority {
                Priority::Critical => "[!] ",
                Priority::High => "[*] ",
                Priority::Medium => "[-] ",
                Priority::Low => "[+] ",
            }
        }
    }

    fn score_color(score: u32) -> Color {
        match AlignmentBand::from_score(score) {
            AlignmentBand::Strong => Color::Green,
            AlignmentBand::Moderate => Color::Yellow,
            AlignmentBand::HighRisk => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let summary = &report.summary;
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 CURRICULUM ALIGNMENT ANALYSIS", 1));
        output.push_str(&format!(
            "Program: {} | Benchmark: {} ({}) | Mode: {}\n",
            summary.program_name, summary.benchmark_name, summary.benchmark_source, summary.program_mode
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "WAI Score: {}% {}\n",
            summary.wai_score,
            self.format_score_badge(summary.band)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&summary.verdict, Color::Cyan)));
        output.push_str(&format!(
            "Benchmark similarity: {:.3} | Weights: {}\n",
            analysis.overall_similarity, summary.weights_name
        ));

        output.push_str(&self.format_header("Cluster Scores", 3));
        for cluster in SkillCluster::ALL {
            let score = analysis.cluster_score(cluster);
            output.push_str(&format!(
                "  {:<15} {:>4}   (coverage {})\n",
                cluster.label(),
                self.colorize(&format!("{}%", score), Self::score_color(score)),
                coverage_text(report, cluster)
            ));
        }

        if !summary.strengths.is_empty() {
            output.push_str(&self.format_header("✅ Strengths", 3));
            for strength in &summary.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !summary.weak_areas.is_empty() {
            output.push_str(&self.format_header("🎯 Weak Areas", 3));
            for area in &summary.weak_areas {
                output.push_str(&format!("  • {}\n", self.colorize(area, Color::Yellow)));
            }
        }

        if !analysis.gaps.is_empty() {
            output.push_str(&self.format_header("Skill Gaps", 2));
            let shown = if self.detailed {
                analysis.gaps.len()
            } else {
                SUMMARY_GAP_COUNT
            };
            for gap in analysis.gaps.iter().take(shown) {
                output.push_str(&format!(
                    "  • {} {} coverage {}% vs {}% (gap {})\n",
                    self.colorize(&gap.skill_name, Color::White),
                    self.colorize(&format!("[{}]", gap.cluster.label()), Color::BrightBlack),
                    gap.coverage,
                    gap.benchmark_expected,
                    self.colorize(&gap.gap.to_string(), Color::Red)
                ));
            }
            if analysis.gaps.len() > shown {
                output.push_str(&format!(
                    "  ... and {} more (use --detailed)\n",
                    analysis.gaps.len() - shown
                ));
            }
        }

        if !report.redundant_courses.is_empty() {
            output.push_str(&self.format_header(
                &format!("Redundant Courses (score {})", analysis.redundancy_score),
                2,
            ));
            for pair in &report.redundant_courses {
                output.push_str(&format!(
                    "  • {} / {} ({:.2})\n",
                    pair.course1.display_name(),
                    pair.course2.display_name(),
                    pair.overlap
                ));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Course Structure", 2));
            output.push_str(&format!(
                "Depth: basic {}% | applied {}% | advanced {}%\n",
                analysis.depth_profile.basic,
                analysis.depth_profile.applied,
                analysis.depth_profile.advanced
            ));
            output.push_str(&format!(
                "Theory / practice: {}% / {}%\n",
                analysis.theory_practice_ratio.theory, analysis.theory_practice_ratio.practice
            ));
        }

        if !report.recommendations.is_empty() {
            output.push_str(&self.format_header("📋 Recommendations", 2));
            for (i, rec) in report.recommendations.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {}{} {}\n",
                    i + 1,
                    self.format_priority_icon(rec.priority),
                    self.colorize(&rec.title, Color::White),
                    self.colorize(&format!("({})", rec.recommendation_type), Color::BrightBlack)
                ));
                if self.detailed {
                    output.push_str(&format!("   {}\n", rec.title_ar));
                }
                output.push_str(&format!("   {}\n", rec.description));
            }
        }

        output.push_str(&format!(
            "\n{} Generated by Curriculum Aligner v{} | Catalog {} | {}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.aligner_version,
            report.metadata.catalog_version,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if let Some(id) = &report.metadata.analysis_id {
            output.push_str(&format!("Analysis id: {}\n", id));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let summary = &report.summary;
        let analysis = &report.analysis;

        let clusters = SkillCluster::ALL
            .iter()
            .map(|cluster| HtmlClusterRow {
                label: cluster.label().to_string(),
                score: analysis.cluster_score(*cluster),
                coverage: coverage_text(report, *cluster),
            })
            .collect();

        let gaps: Vec<HtmlGapRow> = analysis
            .gaps
            .iter()
            .map(|gap| HtmlGapRow {
                skill: gap.skill_name.clone(),
                cluster: gap.cluster.label().to_string(),
                coverage: gap.coverage,
                expected: gap.benchmark_expected,
                gap: gap.gap,
            })
            .collect();

        let redundant: Vec<HtmlRedundantRow> = report
            .redundant_courses
            .iter()
            .map(|pair| HtmlRedundantRow {
                first: pair.course1.display_name(),
                second: pair.course2.display_name(),
                overlap: format!("{:.2}", pair.overlap),
            })
            .collect();

        let recommendations: Vec<HtmlRecommendation> = report
            .recommendations
            .iter()
            .map(|rec| HtmlRecommendation {
                title: rec.title.clone(),
                title_ar: rec.title_ar.clone(),
                kind: rec.recommendation_type.to_string(),
                priority: rec.priority.to_string(),
                description: rec.description.clone(),
            })
            .collect();

        let band_class = match summary.band {
            AlignmentBand::Strong => "strong",
            AlignmentBand::Moderate => "moderate",
            AlignmentBand::HighRisk => "high_risk",
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            program_name: summary.program_name.clone(),
            benchmark_name: summary.benchmark_name.clone(),
            benchmark_source: summary.benchmark_source.to_string(),
            program_mode: summary.program_mode.to_string(),
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            wai_score: summary.wai_score,
            band_class: band_class.to_string(),
            band_label: summary.band.label().to_string(),
            verdict: summary.verdict.clone(),
            similarity: format!("{:.3}", analysis.overall_similarity),
            weights_name: summary.weights_name.clone(),
            clusters,
            has_gaps: !gaps.is_empty(),
            gaps,
            has_redundancy: !redundant.is_empty(),
            redundant,
            redundancy_score: analysis.redundancy_score,
            depth_basic: analysis.depth_profile.basic,
            depth_applied: analysis.depth_profile.applied,
            depth_advanced: analysis.depth_profile.advanced,
            theory: analysis.theory_practice_ratio.theory,
            practice: analysis.theory_practice_ratio.practice,
            has_recommendations: !recommendations.is_empty(),
            recommendations,
            version: report.metadata.aligner_version.clone(),
            catalog_version: report.metadata.catalog_version.clone(),
            analysis_id: report.metadata.analysis_id.clone().unwrap_or_default(),
            has_analysis_id: report.metadata.analysis_id.is_some(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| AlignerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(band: AlignmentBand) -> &'static str {
        match band {
            AlignmentBand::Strong => "🟢 Strong",
            AlignmentBand::Moderate => "🟡 Moderate",
            AlignmentBand::HighRisk => "🔴 High risk",
        }
    }

    fn format_markdown_recommendation(index: usize, rec: &RecommendationDraft) -> String {
        let mut output = format!("#### {}. {}\n\n", index, rec.title);
        output.push_str(&format!("_{}_\n\n", rec.title_ar));
        output.push_str(&format!("**Type:** {}\n\n", rec.recommendation_type));
        output.push_str(&format!("{}\n\n", rec.description));
        if !rec.linked_skill_ids.is_empty() {
            output.push_str(&format!(
                "**Skills:** `{}`\n\n",
                rec.linked_skill_ids.join("`, `")
            ));
        }
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let summary = &report.summary;
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&format!(
            "# 📊 Curriculum Alignment Report: {}\n\n",
            summary.program_name
        ));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Benchmark:** {} ({}) | **Mode:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                summary.benchmark_name,
                summary.benchmark_source,
                summary.program_mode
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**WAI Score:** {}% {}\n\n",
            summary.wai_score,
            Self::markdown_score_badge(summary.band)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", summary.verdict));
        output.push_str(&format!(
            "**Benchmark similarity:** {:.3} | **Weights:** {}\n\n",
            analysis.overall_similarity, summary.weights_name
        ));

        output.push_str("### Cluster Scores\n\n");
        output.push_str("| Cluster | Score | Coverage |\n");
        output.push_str("|---------|-------|----------|\n");
        for cluster in SkillCluster::ALL {
            output.push_str(&format!(
                "| {} | {}% | {} |\n",
                cluster.label(),
                analysis.cluster_score(cluster),
                coverage_text(report, cluster)
            ));
        }
        output.push('\n');

        if !analysis.gaps.is_empty() {
            output.push_str("## Skill Gaps\n\n");
            output.push_str("| Skill | Cluster | Coverage | Benchmark | Gap |\n");
            output.push_str("|-------|---------|----------|-----------|-----|\n");
            for gap in &analysis.gaps {
                output.push_str(&format!(
                    "| {} | {} | {}% | {}% | {} |\n",
                    gap.skill_name,
                    gap.cluster.label(),
                    gap.coverage,
                    gap.benchmark_expected,
                    gap.gap
                ));
            }
            output.push('\n');
        }

        if !report.redundant_courses.is_empty() {
            output.push_str(&format!(
                "## Redundant Courses (score {})\n\n",
                analysis.redundancy_score
            ));
            for pair in &report.redundant_courses {
                output.push_str(&format!(
                    "- {} / {}: {:.2}\n",
                    pair.course1.display_name(),
                    pair.course2.display_name(),
                    pair.overlap
                ));
            }
            output.push('\n');
        }

        output.push_str("## Course Structure\n\n");
        output.push_str(&format!(
            "- Depth: basic {}%, applied {}%, advanced {}%\n",
            analysis.depth_profile.basic,
            analysis.depth_profile.applied,
            analysis.depth_profile.advanced
        ));
        output.push_str(&format!(
            "- Theory / practice: {}% / {}%\n\n",
            analysis.theory_practice_ratio.theory, analysis.theory_practice_ratio.practice
        ));

        if !report.recommendations.is_empty() {
            output.push_str("## 📋 Recommendations\n\n");
            let sections = [
                (Priority::Critical, "### 🚨 Critical Priority\n\n"),
                (Priority::High, "### ⚠️ High Priority\n\n"),
                (Priority::Medium, "### 📋 Medium Priority\n\n"),
                (Priority::Low, "### 💡 Low Priority\n\n"),
            ];
            for (priority, heading) in sections {
                let recs: Vec<&RecommendationDraft> = report
                    .recommendations
                    .iter()
                    .filter(|r| r.priority == priority)
                    .collect();
                if recs.is_empty() {
                    continue;
                }
                output.push_str(heading);
                for (i, rec) in recs.iter().enumerate() {
                    output.push_str(&Self::format_markdown_recommendation(i + 1, rec));
                }
            }
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Curriculum Aligner v{} with certification catalog {}*\n",
                report.metadata.aligner_version, report.metadata.catalog_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// File name for a saved report, derived from the program name.
pub fn suggest_filename(format: &OutputFormat, program_name: &str, timestamp: bool) -> String {
    let base_name: String = program_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    let base_name = if base_name.is_empty() {
        "program".to_string()
    } else {
        base_name
    };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_alignment{}.{}", base_name, timestamp_suffix, extension)
}
