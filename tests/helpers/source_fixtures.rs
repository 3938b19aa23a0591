//! Reusable BBj sources.

pub const LIST_CLASS: &str = "\
class public List
  field public BBjNumber size
  method public void add(BBjString item$)
    #size = #size + 1
  methodend
classend
let map = new List(err=*next)
";

pub const SHARED_LIB: &str = "\
class public Shared
  method public void run()
  methodend
classend
";

pub const SHARED_USER: &str = "\
use ::lib.bbj::Shared
declare Shared s!
s! = new Shared()
";

pub const LABEL_TARGETS: &str = "\
seterr handler
setesc escape
goto main
main:
print \"ok\"
handler:
escape:
end
";
