//! Common design file fixtures for tests.

pub const EMPTY_REPORT: &str = r#"<report version="3.2.23"/>"#;

pub const SIMPLE_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<report xmlns="http://www.eclipse.org/birt/2005/design" version="3.2.23" id="1">
    <body>
        <label name="title" id="2" text="Quarterly Sales"/>
        <data name="total" expression="row[&quot;total&quot;]"/>
    </body>
</report>
"#;

/// A report whose only problem is an unknown attribute on a child.
pub const REPORT_WITH_BAD_ATTRIBUTE: &str = r#"<report>
    <body>
        <label name="title" text="Sales" colour="red"/>
    </body>
</report>
"#;

pub const BASE_LIBRARY: &str = r#"<library version="3.2.23">
    <components>
        <label name="BaseLabel" id="1" text="Base"/>
        <grid name="BaseGrid" id="2" columns="2">
            <cell><label name="BaseCellLabel" id="3" text="Cell"/></cell>
        </grid>
    </components>
    <styles>
        <style name="Heading" id="4" color="navy"/>
    </styles>
</library>
"#;

/// Library whose content is not allowed where it appears.
pub const BROKEN_LIBRARY: &str = r#"<library>
    <components>
        <cell/>
    </components>
</library>
"#;

pub const REPORT_USING_BASE: &str = r#"<report>
    <include-library file-name="base.xml" namespace="base"/>
    <body>
        <label name="title" extends="base.BaseLabel"/>
        <grid name="layout" extends="base.BaseGrid"/>
    </body>
</report>
"#;

pub const REPORT_USING_BROKEN: &str = r#"<report>
    <include-library file-name="broken.xml" namespace="broken"/>
    <body>
        <label name="title" text="Sales"/>
    </body>
</report>
"#;
