//! Built-in provider table, sorted by name.

use crate::args::FlagDef;
use crate::catalog::{AuthTemplate, ParamTemplate, ProviderDescriptor, DEFAULT_RATE_LIMIT};

use ParamTemplate::{Integer, List, Text};

const TOKEN: FlagDef = FlagDef::required("token", "API token used for outbound requests");
const EMAIL: FlagDef = FlagDef::required("email", "Account email paired with the API token");
const DOMAIN: FlagDef = FlagDef::required("domain", "Instance domain (e.g. acme.example.com)").domain();
const WEBHOOK_SECRET: FlagDef =
    FlagDef::optional("webhook-secret", "Secret used to verify inbound webhooks");

const BEARER: AuthTemplate = AuthTemplate::new(
    "header_token",
    &[("header", Text("Authorization")), ("value", Text("Bearer {token}"))],
);

const BASIC_EMAIL_TOKEN: AuthTemplate = AuthTemplate::new(
    "basic_auth",
    &[("username", Text("{email}")), ("password", Text("{token}"))],
);

pub static PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        name: "anthropic",
        summary: "Anthropic Messages API",
        flags: &[TOKEN],
        destination: "https://api.anthropic.com",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: 50,
        incoming: &[],
        outgoing: &[
            AuthTemplate::new(
                "header_token",
                &[("header", Text("x-api-key")), ("value", Text("{token}"))],
            ),
            AuthTemplate::new(
                "header_token",
                &[("header", Text("anthropic-version")), ("value", Text("2023-06-01"))],
            ),
        ],
    },
    ProviderDescriptor {
        name: "asana",
        summary: "Asana REST API",
        flags: &[TOKEN],
        destination: "https://app.asana.com/api/1.0",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[BEARER],
    },
    ProviderDescriptor {
        name: "cloudrun",
        summary: "Google Cloud Run service called with an identity token",
        flags: &[DOMAIN],
        destination: "{domain}",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[AuthTemplate::new(
            "gcp_identity_token",
            &[("audience", Text("{domain}"))],
        )],
    },
    ProviderDescriptor {
        name: "confluence",
        summary: "Atlassian Confluence Cloud",
        flags: &[DOMAIN, EMAIL, TOKEN],
        destination: "{domain}/wiki",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[BASIC_EMAIL_TOKEN],
    },
    ProviderDescriptor {
        name: "datadog",
        summary: "Datadog API",
        flags: &[
            FlagDef::required("api-key", "Datadog API key"),
            FlagDef::required("app-key", "Datadog application key"),
            FlagDef::defaulted("domain", "api.datadoghq.com", "Datadog site API host").domain(),
        ],
        destination: "{domain}",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[
            AuthTemplate::new(
                "header_token",
                &[("header", Text("DD-API-KEY")), ("value", Text("{api-key}"))],
            ),
            AuthTemplate::new(
                "header_token",
                &[("header", Text("DD-APPLICATION-KEY")), ("value", Text("{app-key}"))],
            ),
        ],
    },
    ProviderDescriptor {
        name: "github",
        summary: "GitHub REST API and webhooks",
        flags: &[TOKEN, WEBHOOK_SECRET],
        destination: "https://api.github.com",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[AuthTemplate::new(
            "hmac_signature",
            &[
                ("header", Text("X-Hub-Signature-256")),
                ("prefix", Text("sha256=")),
                ("algorithm", Text("sha256")),
                ("secrets", List(&["{webhook-secret}"])),
            ],
        )
        .when("webhook-secret")],
        outgoing: &[BEARER],
    },
    ProviderDescriptor {
        name: "gitlab",
        summary: "GitLab REST API and webhooks",
        flags: &[
            TOKEN,
            FlagDef::defaulted("domain", "gitlab.com", "GitLab instance domain").domain(),
            WEBHOOK_SECRET,
        ],
        destination: "{domain}/api/v4",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[AuthTemplate::new(
            "shared_secret_header",
            &[("header", Text("X-Gitlab-Token")), ("secrets", List(&["{webhook-secret}"]))],
        )
        .when("webhook-secret")],
        outgoing: &[AuthTemplate::new(
            "header_token",
            &[("header", Text("PRIVATE-TOKEN")), ("value", Text("{token}"))],
        )],
    },
    ProviderDescriptor {
        name: "hubspot",
        summary: "HubSpot CRM API",
        flags: &[TOKEN],
        destination: "https://api.hubapi.com",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[BEARER],
    },
    ProviderDescriptor {
        name: "jira",
        summary: "Atlassian Jira Cloud",
        flags: &[DOMAIN, EMAIL, TOKEN],
        destination: "{domain}",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[BASIC_EMAIL_TOKEN],
    },
    ProviderDescriptor {
        name: "linear",
        summary: "Linear GraphQL API and webhooks",
        flags: &[TOKEN, WEBHOOK_SECRET],
        destination: "https://api.linear.app",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[AuthTemplate::new(
            "hmac_signature",
            &[
                ("header", Text("Linear-Signature")),
                ("prefix", Text("")),
                ("algorithm", Text("sha256")),
                ("secrets", List(&["{webhook-secret}"])),
            ],
        )
        .when("webhook-secret")],
        outgoing: &[AuthTemplate::new(
            "header_token",
            &[("header", Text("Authorization")), ("value", Text("{token}"))],
        )],
    },
    ProviderDescriptor {
        name: "notion",
        summary: "Notion API",
        flags: &[TOKEN],
        destination: "https://api.notion.com",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: 30,
        incoming: &[],
        outgoing: &[
            BEARER,
            AuthTemplate::new(
                "header_token",
                &[("header", Text("Notion-Version")), ("value", Text("2022-06-28"))],
            ),
        ],
    },
    ProviderDescriptor {
        name: "okta",
        summary: "Okta management API",
        flags: &[DOMAIN, TOKEN],
        destination: "{domain}/api/v1",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[AuthTemplate::new(
            "header_token",
            &[("header", Text("Authorization")), ("value", Text("SSWS {token}"))],
        )],
    },
    ProviderDescriptor {
        name: "openai",
        summary: "OpenAI API",
        flags: &[TOKEN],
        destination: "https://api.openai.com",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: 50,
        incoming: &[],
        outgoing: &[BEARER],
    },
    ProviderDescriptor {
        name: "pagerduty",
        summary: "PagerDuty REST API",
        flags: &[TOKEN],
        destination: "https://api.pagerduty.com",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[AuthTemplate::new(
            "header_token",
            &[("header", Text("Authorization")), ("value", Text("Token token={token}"))],
        )],
    },
    ProviderDescriptor {
        name: "sendgrid",
        summary: "SendGrid mail API",
        flags: &[TOKEN],
        destination: "https://api.sendgrid.com",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[BEARER],
    },
    ProviderDescriptor {
        name: "sentry",
        summary: "Sentry API",
        flags: &[
            TOKEN,
            FlagDef::defaulted("domain", "sentry.io", "Sentry instance domain").domain(),
        ],
        destination: "{domain}/api/0",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[BEARER],
    },
    ProviderDescriptor {
        name: "slack",
        summary: "Slack Web API and Events API",
        flags: &[
            TOKEN,
            FlagDef::optional("signing-secret", "Slack app signing secret for inbound events"),
        ],
        destination: "https://slack.com/api",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[AuthTemplate::new(
            "slack_signature",
            &[("secrets", List(&["{signing-secret}"]))],
        )
        .when("signing-secret")],
        outgoing: &[BEARER],
    },
    ProviderDescriptor {
        name: "stripe",
        summary: "Stripe API and webhooks",
        flags: &[TOKEN, WEBHOOK_SECRET],
        destination: "https://api.stripe.com",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[AuthTemplate::new(
            "stripe_signature",
            &[("secrets", List(&["{webhook-secret}"])), ("tolerance_seconds", Integer(300))],
        )
        .when("webhook-secret")],
        outgoing: &[BEARER],
    },
    ProviderDescriptor {
        name: "twilio",
        summary: "Twilio REST API",
        flags: &[
            FlagDef::required("account-sid", "Twilio account SID"),
            TOKEN,
        ],
        destination: "https://api.twilio.com",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[AuthTemplate::new(
            "basic_auth",
            &[("username", Text("{account-sid}")), ("password", Text("{token}"))],
        )],
    },
    ProviderDescriptor {
        name: "zendesk",
        summary: "Zendesk Support API",
        flags: &[DOMAIN, EMAIL, TOKEN],
        destination: "{domain}/api/v2",
        in_rate_limit: DEFAULT_RATE_LIMIT,
        out_rate_limit: DEFAULT_RATE_LIMIT,
        incoming: &[],
        outgoing: &[AuthTemplate::new(
            "basic_auth",
            &[("username", Text("{email}/token")), ("password", Text("{token}"))],
        )],
    },
];
