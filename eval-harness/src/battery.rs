/// Trace every battery question is asked about.
pub const EVAL_TRACE_ID: &str = "e72ef241661424eb6970b65f6fd74b30";

/// Fixed answer the QA service returns when it cannot answer from the passage.
/// Scoring forces it to zero, see [`crate::scoring::score_with_override`].
pub const NO_ANSWER_FOUND: &str = "Insufficient Information";

#[derive(Debug, Clone, Copy)]
pub struct QaItem {
    pub question: &'static str,
    pub reference: &'static str,
}

/// The fixed, ordered question/reference battery for the hotrod dispatch trace.
pub fn battery() -> &'static [QaItem] {
    &BATTERY
}

static BATTERY: [QaItem; 26] = [
    QaItem {
        question: "What distinct operation names are invoked by /dispatch?",
        reference: "It invokes HTTP GET in the frontend service",
    },
    QaItem {
        question: "What is the customer ID?",
        reference: "731",
    },
    QaItem {
        question: "What distinct service names are affected by the Redis error?",
        reference: "Redis-manual service and driver service",
    },
    QaItem {
        question: "What is the SQL operation performed by mysql?",
        reference: "SQL SELECT",
    },
    QaItem {
        question: "What service invokes redis-manual service?",
        reference: "Driver service",
    },
    QaItem {
        question: "Where is the location to find the driver?",
        reference: "94,287",
    },
    QaItem {
        question: "Why was there an error while finding a driver?",
        reference: "This is a Redis timeout error",
    },
    QaItem {
        question: "Why did /dispatch API succeed despite a timeout in Redis?",
        reference: "The call to Redis was retried multiple times until successful",
    },
    QaItem {
        question: "How many APIs do /dispatch invoke?",
        reference: "12 APIs",
    },
    QaItem {
        question: "How many errors occurred?",
        reference: "2 errors",
    },
    QaItem {
        question: "How many drivers were found?",
        reference: "10 drivers",
    },
    QaItem {
        question: "How many times did driver service invoke redis-manual?",
        reference: "13 times",
    },
    QaItem {
        question: "How many times to retry Redis?",
        reference: "2 times",
    },
    QaItem {
        question: "True or False. There are 2 instances of Redis errors.",
        reference: "True",
    },
    QaItem {
        question: "True or False. There are 6 Redis errors.",
        reference: "False",
    },
    QaItem {
        question: "True or False. The Redis error is caused by a timeout.",
        reference: "True",
    },
    QaItem {
        question: "True or False. Driver ID T7991012 is found as a nearby driver.",
        reference: "False",
    },
    QaItem {
        question: "True or False. Mysql service is called by customer service.",
        reference: "True",
    },
    QaItem {
        question: "True or False. Mysql service is invoked by frontend.",
        reference: "False",
    },
    QaItem {
        question: "True or False. Redis service calls driver service.",
        reference: "False",
    },
    QaItem {
        question: "True or False. /route operation calls Redis service.",
        reference: "False",
    },
    QaItem {
        question: "True or False. There are outgoing calls from Mysql service.",
        reference: "False",
    },
    QaItem {
        question: "True or False. Frontend invokes customer service and route service.",
        reference: "True",
    },
    QaItem {
        question: "True or False. Redis failed because of low disk space.",
        reference: "False",
    },
    QaItem {
        question: "True or False. A write operation was performed by Mysql.",
        reference: "False",
    },
    QaItem {
        question: "True or False. There is an indirect API call between frontend and redis.",
        reference: "True",
    },
];
