/// print the list of commands and their usage.
pub fn help() {
    println!("commands:");
    println!("  show                   display a random quote from the active filter");
    println!("  add <category> <text>  add a quote and publish it to the remote side");
    println!("  filter <category|all>  set the active category filter");
    println!("  categories             list the known categories");
    println!("  list                   list the quotes matching the active filter");
    println!("  sync                   reconcile with the remote collection now");
    println!("  export [path]          write the collection to a JSON file (default quotes.json)");
    println!("  import <path>          append a JSON collection file");
    println!("  status                 version, uptime, counts, last sync");
    println!("  quit                   exit");
}
