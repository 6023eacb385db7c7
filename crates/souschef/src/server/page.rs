//! HTML for the planner page

use crate::pipeline::Plan;
use crate::recipe::URL_PROMPT;
use crate::render::escape;

const PLACEHOLDER: &str = "https://tasty.co/recipe/classic-chicken-noodle-soup";

const STYLE: &str = "body { font-family: sans-serif; margin: 2rem; }\n\
  h1 { color: #f46524; text-align: left; }\n\
  form input { width: 50%; padding: 0.4rem; }\n\
  .error { color: #b00020; }";

fn layout(input: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>SousChef.ai</title>\n\
     <style>\n{STYLE}\n</style>\n</head>\n<body>\n<h1>SousChef.ai</h1>\n\
     <p>What would you like to cook, home chef?</p>\n\
     <form method=\"get\" action=\"/\">\n<input type=\"text\" name=\"url\" value=\"{}\" placeholder=\"{PLACEHOLDER}\">\n</form>\n\
     {body}\n</body>\n</html>\n",
    escape(input)
  )
}

/// Page asking for a recipe link
pub fn prompt(input: &str) -> String {
  layout(input, &format!("<p>{URL_PROMPT}</p>"))
}

/// Page showing a finished plan
pub fn plan(input: &str, plan: &Plan) -> String {
  let body = format!("<p>Check out the following plan for {}:</p>\n<figure>\n{}</figure>", escape(&plan.title), plan.svg);
  layout(input, &body)
}

/// Page reporting a failed plan
pub fn failure(input: &str, message: &str) -> String {
  layout(input, &format!("<p class=\"error\">Could not plan this recipe: {}</p>", escape(message)))
}
