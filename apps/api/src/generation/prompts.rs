// All LLM prompt templates for the generation and research flows.
// Placeholders are `{name}`, filled in a single pass by `builder::fill_template`.

/// System prompt for email generation.
/// Replace: {sender_company}, {tone}, {tone_guidance}
pub const EMAIL_SYSTEM_TEMPLATE: &str = r#"You are an expert B2B cold email copywriter for {sender_company}, an AI solutions partner.
You write personalized cold emails that earn replies by being relevant and insightful.

TONE: {tone} — {tone_guidance}

RULES:
- Never use clickbait subject lines
- Reference specific details about the target company from the scraped context
- Sound genuine and human; avoid corporate buzzwords
- Keep every email body under 150 words
- Always sign off with the sender name provided
- Return ONLY valid JSON. No markdown, no code fences, no explanation

OUTPUT FORMAT:
Return a JSON array of exactly 3 objects, each with "subject" and "body" string keys:
[{"subject": "...", "body": "..."}, {"subject": "...", "body": "..."}, {"subject": "...", "body": "..."}]"#;

/// User prompt for email generation.
/// Replace: {recipient_name}, {recipient_title}, {company_name}, {industry},
///          {sender_name}, {sender_company}, {scraped_block}, {strategy}
pub const EMAIL_USER_TEMPLATE: &str = r#"Generate 3 cold email variations for this recipient:

RECIPIENT: {recipient_name}, {recipient_title} at {company_name}
INDUSTRY: {industry}
SENDER NAME: {sender_name}
{scraped_block}
EMAIL STRUCTURE (every variation follows it):
1. Personal opener (1-2 sentences): reference something specific about THEIR company from the scraped context
2. Value bridge (2-3 sentences): concrete ways AI creates business value for their company or industry
3. Competitive context (1-2 sentences): how competitors or the wider industry are using AI
4. {sender_company} positioning (1 sentence): a trusted advisor, not a vendor
5. Soft CTA (1 sentence): suggest a short chat to share insights
6. Sign-off: use "{sender_name}"

VARIATION STRATEGY:
{strategy}

Return ONLY the JSON array with 3 variations. No other text."#;

/// Scraped-context block embedded in the user prompt when context exists.
/// Replace: {company}, {description}, {services}, {industry_signals}
pub const SCRAPED_CONTEXT_TEMPLATE: &str = r#"
SCRAPED COMPANY CONTEXT:
- Company: {company}
- Description: {description}
- Services/Offerings: {services}
- Industry Signals: {industry_signals}
"#;

/// Placeholder for scraped fields with no content.
pub const MISSING_FIELD: &str = "N/A";

/// Search-grounded company research prompt.
/// Replace: {url}, {company_line}, {website_block}
pub const RESEARCH_PROMPT_TEMPLATE: &str = r#"Research this company for a B2B cold outreach email.

Company URL: {url}
{company_line}{website_block}

Provide a research profile covering:
1. Company overview and what they do
2. Key products/services
3. Industry and target market
4. Challenges they likely face
5. Where AI/automation could help them

Format as 2-3 concise paragraphs of actionable findings."#;
