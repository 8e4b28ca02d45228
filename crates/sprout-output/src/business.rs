//! Chinese business summary in text, HTML and Markdown form.

use crate::artifact::{Artifact, write_text};
use crate::error::Result;
use crate::format::html_escape;
use std::path::{Path, PathBuf};

/// Title shared by every business report format.
pub const BUSINESS_TITLE: &str = "样例数据业务分析汇报";

/// Placeholder replaced by the data file path.
const DATA_FILE_PLACEHOLDER: &str = "{DATA_FILE}";

/// Narrative body. The figures describe the bundled January 2026 sample.
const BUSINESS_TEMPLATE: &str = "样例数据业务分析汇报

数据文件：{DATA_FILE}

一、管理层摘要

本次对 2026 年 1 月样例增长数据进行检查后，结论如下：

1. 数据可用于演示分析流程，但当前不适合直接作为正式经营报表依据。
2. 在现有样本中，paid 渠道转化效率最高，是最值得优先优化与扩量的渠道。
3. 整体收入呈上升趋势，月末相较月初明显改善。
4. referral 渠道存在单点极端异常收入，若不清洗会严重误导业务判断。

二、核心业务发现

1. 渠道转化效率

按 sessions -> signups -> orders 口径看：
- paid 渠道转化效率最高
- referral 渠道处于中间水平
- organic 渠道整体偏弱

这意味着如果当前目标是短期提升订单量，优先关注 paid 的投放效率和成本控制会更直接；如果目标是改善自然流量质量，则需要重点排查 organic 的流量来源与落地页表现。

2. 收入趋势

从周度汇总看：
- 首周收入：1210
- 末周收入：1657
- 增长幅度：+36.94%

这说明在剔除明显异常点影响后，收入总体呈上行趋势，业务表现有改善迹象。

3. 收入驱动关系

回归结果显示：
- sessions 与 orders 呈显著正相关
- orders 与 revenue_usd 呈显著正相关
- sessions 与 signups 也存在稳定正相关关系

业务上可以理解为：
- 流量提升会带动订单提升
- 订单提升会直接带动收入增长
- 因此增长工作的关键仍然是提升有效流量与转化质量，而不是只看表面曝光量

三、风险提示

1. 数据质量风险

当前数据中发现以下问题：
- 1 条完全重复记录
- 2 个缺失字段
- 1 条负数 sessions
- 1 条极端异常收入记录

这些问题会直接影响渠道收入、ROI、趋势判断和回归结果稳定性。

2. 异常值风险

最关键异常为：
2026-01-20 / referral / APAC / U1065 / revenue_usd = 9900

该条记录使 referral 渠道总收入被明显放大。若不剔除，业务层很容易错误判断该渠道为高价值来源。

四、建议动作

短期建议
1. 先建立数据清洗口径后再出正式报表。
2. 对 referral 渠道异常记录做来源回查。
3. 继续观察并优化 paid 渠道效率，补充成本完整性后评估 ROI。
4. 对 organic 渠道做专项排查，重点看流量质量、用户意图和转化链路。

中期建议
1. 建立数据质量校验规则：缺失、重复、负值、异常值自动告警。
2. 固化周报口径，统一趋势分析口径与异常处理规则。
3. 将回归分析纳入月度复盘，用于识别对订单和收入最敏感的指标。

五、结论

如果按可直接支持业务决策的标准看，这份样例数据目前最大的工作不是继续深挖，而是先完成数据清洗。

在完成清洗后，当前最明确的方向是：
- 以 paid 为主要增长抓手
- 对 organic 做转化优化
- 对 referral 先完成异常核查，再决定是否扩量
";

/// Output format of the business report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessFormat {
    /// Plain text with a byte-order mark
    Text,
    /// Styled HTML page
    Html,
    /// Markdown with a byte-order mark
    Markdown,
}

impl BusinessFormat {
    /// Every format, in write order.
    pub const ALL: [Self; 3] = [Self::Text, Self::Html, Self::Markdown];

    /// File name for this format.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Text => "business-report-zh.txt",
            Self::Html => "business-report-zh.html",
            Self::Markdown => "business-report-zh.md",
        }
    }

    /// Whether the file starts with a UTF-8 byte-order mark.
    pub const fn byte_order_mark(&self) -> bool {
        matches!(self, Self::Text | Self::Markdown)
    }
}

/// The business narrative for one data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessReport {
    data_file: String,
}

impl BusinessReport {
    /// Create the report for `data_file`, shown as given.
    pub fn new(data_file: impl Into<String>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// Narrative with the data file filled in.
    pub fn text(&self) -> String {
        BUSINESS_TEMPLATE.replacen(DATA_FILE_PLACEHOLDER, &self.data_file, 1)
    }

    /// Narrative under a level-one Markdown heading.
    pub fn markdown(&self) -> String {
        format!("# {BUSINESS_TITLE}\n\n{}", self.text())
    }

    /// Narrative as a standalone HTML page.
    pub fn html(&self) -> String {
        let title = BUSINESS_TITLE;
        let data_file = html_escape(&self.data_file);
        let body = html_escape(&self.text());
        format!(
            r#"<!doctype html>
<html lang="zh-CN">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
:root {{ --bg:#f6f1e8; --card:#fffdf8; --ink:#1f2328; --muted:#5b6470; --line:#d8cdbd; --accent:#9a3412; }}
body {{ margin:0; font-family:"Microsoft YaHei","PingFang SC","Noto Sans SC",sans-serif; background:linear-gradient(180deg,#efe4d2 0%, #f8f4ec 100%); color:var(--ink); }}
main {{ max-width:900px; margin:40px auto; background:var(--card); border:1px solid var(--line); border-radius:18px; padding:40px; box-shadow:0 12px 40px rgba(0,0,0,.08); }}
h1 {{ font-size:34px; margin-top:0; }} p {{ line-height:1.75; font-size:16px; white-space:pre-wrap; }}
code {{ background:#f2eadf; padding:2px 6px; border-radius:6px; }} .muted {{ color:var(--muted); }}
</style>
</head>
<body>
<main>
<h1>{title}</h1>
<p class="muted">数据文件：<code>{data_file}</code></p>
<p>{body}</p>
</main>
</body>
</html>"#
        )
    }

    /// The report in one format, ready to write.
    pub const fn document(&self, format: BusinessFormat) -> BusinessDocument<'_> {
        BusinessDocument { report: self, format }
    }

    /// The report in every format.
    pub fn documents(&self) -> [BusinessDocument<'_>; 3] {
        BusinessFormat::ALL.map(|format| self.document(format))
    }
}

/// One format of a [`BusinessReport`].
#[derive(Debug, Clone, Copy)]
pub struct BusinessDocument<'a> {
    report: &'a BusinessReport,
    format: BusinessFormat,
}

impl BusinessDocument<'_> {
    /// Rendered contents, without the byte-order mark.
    pub fn render(&self) -> String {
        match self.format {
            BusinessFormat::Text => self.report.text(),
            BusinessFormat::Html => self.report.html(),
            BusinessFormat::Markdown => self.report.markdown(),
        }
    }
}

impl Artifact for BusinessDocument<'_> {
    fn file_name(&self) -> &str {
        self.format.file_name()
    }

    fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        write_text(dir, self.format.file_name(), &self.render(), self.format.byte_order_mark())
    }
}
