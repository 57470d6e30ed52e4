mod tests_elements;
mod tests_tables;
mod tests_views;
