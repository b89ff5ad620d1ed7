use crate::domain::model::{Event, EventImpact, ImpactContext};

/// Build the research query for one event's sources.
///
/// Pure string construction; the answer-format contract (single URL alone on
/// the last line, or the literal reply `NONE`) is what the extractor relies
/// on.
pub fn build_event_query(event: &Event) -> String {
    format!(
        "Search the web for a primary source URL documenting the AWS US-EAST-1 outage on October 20, 2025.\n\
        \n\
        Event: {title}\n\
        Description: {description}\n\
        AWS Services: {services}\n\
        \n\
        Find the BEST URL that:\n\
        1. Will be valid long-term (not just a status homepage)\n\
        2. Is an official AWS post-mortem, incident report, or major news article\n\
        3. Contains specific identifiers (date, incident ID)\n\
        \n\
        Reply with the single best URL on its own line at the end of your response. \
        If nothing suitable exists, reply NONE.",
        title = event.title,
        description = event.description,
        services = event.aws_services_affected.join(", "),
    )
}

/// Build the research query for one impact, with the shared incident
/// background and the service context resolved from the lookup table.
pub fn build_impact_query(impact: &EventImpact, ctx: &ImpactContext) -> String {
    format!(
        "Search the web for documentation that {service} (company: {company}) was impacted during the AWS US-EAST-1 outage on October 20, 2025.\n\
        \n\
        BACKGROUND: On October 20, 2025, AWS US-EAST-1 region had a major outage affecting DynamoDB, Route53, and other services. This caused widespread impact on hundreds of internet services and apps.\n\
        \n\
        SERVICE DETAILS:\n\
        - Service: {service} (ID: {service_id})\n\
        - Company: {company}\n\
        - Feature affected: {feature}\n\
        - Impact type: {impact_type}\n\
        - What happened: {description}\n\
        \n\
        TASK: Search for and find the BEST URL that documents this specific impact. Look for:\n\
        1. Official {company} status page with this specific October 20, 2025 incident\n\
        2. News articles from TechCrunch, The Verge, Ars Technica, etc. mentioning \"{service}\" and \"AWS outage\" October 2025\n\
        3. Reddit threads, Twitter/X posts from official {company} account about the outage\n\
        4. DownDetector or similar service tracking sites\n\
        \n\
        IMPORTANT: The URL must be PERMANENT (not just homepage). If you find something, reply with ONLY the URL on the last line. If nothing suitable exists, reply NONE.",
        service = ctx.service_name,
        company = ctx.company,
        service_id = impact.service_id,
        feature = ctx.feature_name,
        impact_type = impact.impact_type,
        description = impact.description,
    )
}
