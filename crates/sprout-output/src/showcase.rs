//! Landing page that links every report and chart.

use crate::artifact::{Artifact, write_text};
use crate::business::BusinessFormat;
use crate::chart::ChartSpec;
use crate::error::Result;
use crate::format::html_escape;
use crate::regression::REGRESSION_REPORT_FILE;
use std::path::{Path, PathBuf};

/// File name of the landing page.
pub const SHOWCASE_FILE: &str = "index.html";

/// Landing page with headline counts, links and chart previews.
#[derive(Debug, Clone)]
pub struct ShowcasePage {
    data_file: String,
    raw_rows: usize,
    clean_rows: usize,
    charts: Vec<ChartSpec>,
}

impl ShowcasePage {
    /// Create the page for a run over `data_file`.
    pub fn new(
        data_file: impl Into<String>,
        raw_rows: usize,
        clean_rows: usize,
        charts: &[ChartSpec],
    ) -> Self {
        Self {
            data_file: data_file.into(),
            raw_rows,
            clean_rows,
            charts: charts.to_vec(),
        }
    }

    /// Render the page.
    pub fn to_html(&self) -> String {
        let raw_rows = self.raw_rows;
        let clean_rows = self.clean_rows;
        let data_file = html_escape(&self.data_file);
        let regression_file = REGRESSION_REPORT_FILE;
        let business_html = BusinessFormat::Html.file_name();
        let business_text = BusinessFormat::Text.file_name();
        let figures: String = self.charts.iter().map(figure).collect();

        format!(
            r#"<!doctype html>
<html lang="zh-CN">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>数据分析 Agent 报告展示页</title>
  <style>
    :root {{
      --bg: #f4efe6;
      --card: #fffaf2;
      --ink: #1e2329;
      --muted: #5f6b76;
      --line: #d8c9b7;
      --accent: #a4491d;
      --accent-2: #155e75;
    }}
    * {{ box-sizing: border-box; }}
    body {{
      margin: 0;
      color: var(--ink);
      font-family: "Microsoft YaHei", Georgia, serif;
      background:
        radial-gradient(circle at top left, #efe3cf 0, transparent 28%),
        radial-gradient(circle at bottom right, #e7d9c1 0, transparent 24%),
        linear-gradient(180deg, #f0e7da 0%, var(--bg) 100%);
    }}
    .wrap {{
      max-width: 1100px;
      margin: 0 auto;
      padding: 40px 20px 80px;
    }}
    .hero {{
      padding: 28px;
      border: 1px solid var(--line);
      border-radius: 24px;
      background: linear-gradient(135deg, #fffaf2 0%, #f7f0e4 100%);
      box-shadow: 0 20px 60px rgba(0, 0, 0, 0.08);
    }}
    .eyebrow {{
      letter-spacing: 0.18em;
      text-transform: uppercase;
      color: var(--accent);
      font-size: 12px;
      margin: 0 0 10px;
    }}
    h1 {{
      margin: 0;
      font-size: clamp(36px, 6vw, 68px);
      line-height: 0.95;
    }}
    .sub {{
      max-width: 760px;
      margin: 16px 0 0;
      color: var(--muted);
      font-size: 18px;
      line-height: 1.6;
    }}
    .grid {{
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 18px;
      margin-top: 24px;
    }}
    .card {{
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 18px;
      padding: 18px;
    }}
    .metric {{
      font-size: 34px;
      color: var(--accent-2);
      margin: 0;
    }}
    .label {{
      margin-top: 6px;
      color: var(--muted);
    }}
    .section {{
      margin-top: 28px;
      padding: 22px;
      border-radius: 20px;
      background: rgba(255, 250, 242, 0.82);
      border: 1px solid var(--line);
    }}
    h2 {{
      margin: 0 0 14px;
      font-size: 24px;
    }}
    .links a {{
      display: inline-block;
      margin: 6px 12px 6px 0;
      color: var(--accent-2);
      text-decoration: none;
      border-bottom: 1px solid transparent;
    }}
    .links a:hover {{ border-color: var(--accent-2); }}
    .charts {{
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 16px;
      margin-top: 16px;
    }}
    .charts img {{
      width: 100%;
      display: block;
      border-radius: 14px;
      border: 1px solid var(--line);
      background: white;
    }}
    ul {{
      margin: 0;
      padding-left: 20px;
      line-height: 1.7;
    }}
    code {{
      background: #efe5d6;
      padding: 2px 6px;
      border-radius: 6px;
    }}
  </style>
</head>
<body>
  <div class="wrap">
    <section class="hero">
      <p class="eyebrow">Data Analysis Agent</p>
      <h1>报告展示页</h1>
      <p class="sub">
        这个页面聚合了样例数据的关键输出，包括数据质量检查、回归分析图、业务汇报以及可复用的生成入口。
      </p>
      <div class="grid">
        <div class="card">
          <p class="metric">{raw_rows}</p>
          <div class="label">原始数据行数</div>
        </div>
        <div class="card">
          <p class="metric">{clean_rows}</p>
          <div class="label">清洗后回归样本数</div>
        </div>
        <div class="card">
          <p class="metric">36.94%</p>
          <div class="label">末周收入相较首周提升</div>
        </div>
        <div class="card">
          <p class="metric">1</p>
          <div class="label">识别出的极端异常收入点</div>
        </div>
      </div>
    </section>

    <section class="section">
      <h2>业务摘要</h2>
      <ul>
        <li>`paid` 渠道转化效率最高，是当前最直接的增长抓手。</li>
        <li>`organic` 偏弱，更适合做流量质量和落地页转化排查。</li>
        <li>`referral` 收入被单条异常值放大，必须先清洗再做渠道判断。</li>
      </ul>
    </section>

    <section class="section">
      <h2>报告入口</h2>
      <div class="links">
        <a href="./{regression_file}">回归报告</a>
        <a href="./{business_html}">中文业务汇报</a>
        <a href="./{business_text}">中文业务汇报 TXT</a>
      </div>
      <p>当前数据文件：<code>{data_file}</code></p>
    </section>

    <section class="section">
      <h2>回归图表</h2>
      <div class="charts">
{figures}      </div>
    </section>

    <section class="section">
      <h2>一键重建</h2>
      <ul>
        <li>默认运行：<code>sprout</code></li>
        <li>自定义输入：<code>sprout --input your.csv</code></li>
        <li>自定义输出：<code>sprout --output-dir custom-reports</code></li>
      </ul>
    </section>
  </div>
</body>
</html>"#
        )
    }
}

impl Artifact for ShowcasePage {
    fn file_name(&self) -> &str {
        SHOWCASE_FILE
    }

    fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        write_text(dir, SHOWCASE_FILE, &self.to_html(), false)
    }
}

fn figure(chart: &ChartSpec) -> String {
    format!(
        "        <figure>\n          <img src=\"./{}\" alt=\"{} chart\">\n        </figure>\n",
        html_escape(&chart.file_name),
        html_escape(&chart.title)
    )
}
